use crate::core::command::{self, Command};
use crate::core::parser;
use crate::utils::error::{EduError, Result};
use regex::Regex;
use std::sync::LazyLock;

static BASIC_COMMAND_FORMAT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<word>\S+)(?P<arguments>.*)$").expect("command format pattern is valid")
});

/// Turns one line of user input into a ready-to-run [`Command`].
pub fn parse_command(input: &str) -> Result<Command> {
    let trimmed = input.trim();
    let captures = BASIC_COMMAND_FORMAT
        .captures(trimmed)
        .ok_or_else(|| EduError::InvalidCommandFormat {
            usage: command::HELP_USAGE.to_string(),
        })?;

    let word = &captures["word"];
    let arguments = &captures["arguments"];
    tracing::debug!("Dispatching '{}' with arguments '{}'", word, arguments);

    match word {
        command::REGISTER_WORD => parser::parse_register(arguments),
        command::DEREGISTER_WORD => parser::parse_deregister(arguments),
        command::CREATE_COURSE_WORD => parser::parse_create_course(arguments),
        command::DELETE_COURSE_WORD => parser::parse_delete_course(arguments),
        command::ADD_STUDENT_WORD => parser::parse_add_student(arguments),
        command::REMOVE_STUDENT_WORD => parser::parse_remove_student(arguments),
        command::VIEW_COURSES_WORD => parser::parse_view_courses(arguments),
        command::LIST_WORD => Ok(Command::List),
        command::HELP_WORD => Ok(Command::Help),
        command::EXIT_WORD => Ok(Command::Exit),
        unknown => {
            tracing::debug!("Unknown command word: {}", unknown);
            Err(EduError::UnknownCommand {
                word: unknown.to_string(),
            })
        }
    }
}
