use codegroup::api::{CmdMessage, MessageLevel};
use codegroup::model::GroupFile;
use colored::{ColoredString, Colorize};
use std::io::{self, Write};

pub(super) fn styled(message: &CmdMessage) -> ColoredString {
    match message.level {
        MessageLevel::Info => message.content.dimmed(),
        MessageLevel::Success => message.content.green(),
        MessageLevel::Warning => message.content.yellow(),
        MessageLevel::Error => message.content.red(),
    }
}

pub(super) fn write_message<W: Write>(out: &mut W, message: &CmdMessage) -> io::Result<()> {
    writeln!(out, "{}", styled(message))
}

pub(super) fn print_messages(messages: &[CmdMessage]) {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for message in messages {
        let _ = write_message(&mut out, message);
    }
}

pub(super) fn print_files(files: &[GroupFile]) {
    for file in files {
        println!("{}", file.file_name);
    }
}
