/// The command processor for the interactive form.
use crate::errors;
use crate::format::MAX_DECIMALS;
use crate::schema::{ColumnSpec, ColumnType};
use crate::timing::TimeOfDay;
use std::collections::VecDeque;

pub const HELP: &str = r#"List of all rowcast commands:

agents <n>                      Number of agents writing rows.
interval <HH:MM:SS>             Time between writes of one agent.
hours always                    Agents write around the clock.
hours <HH:MM> <HH:MM>           Agents write between start and end.
column add <type> [len] [name]  Add a column. Length applies to varchar/text.
column rm <index>               Remove a column (1-based).
column type <index> <type>      Change a column's type.
column length <index> <n>       Change a column's average length.
column clear                    Remove all columns.
columns                         Collapse or expand the column list.
decimals <n>                    Decimal places for byte sizes.
types                           List supported column types.
show                            Print the current estimate.
help                            Show this help.
quit                            Leave the session.
"#;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Agents(u64),
    /// Raw interval text; validated when the projection is computed.
    Interval(String),
    AlwaysActive,
    Hours { start: TimeOfDay, end: TimeOfDay },
    AddColumn(ColumnSpec),
    RemoveColumn(usize),
    SetColumnType { index: usize, type_: ColumnType },
    SetColumnLength { index: usize, length: u64 },
    ClearColumns,
    ToggleColumns,
    Decimals(usize),
    Types,
    Show,
    Help,
    Quit,
}

impl Command {
    /// Whether applying this command changes the form inputs.
    pub fn is_edit(&self) -> bool {
        !matches!(
            self,
            Command::Types | Command::Show | Command::Help | Command::Quit
        )
    }
}

/// Parse a command line.
pub fn parse(s: &str) -> Result<Command, errors::Error> {
    let without_suffix = s.trim().strip_suffix(';').unwrap_or(s.trim());
    let mut deque: VecDeque<&str> = without_suffix.split_whitespace().collect();

    let first = match deque.pop_front() {
        Some(f) => f.to_lowercase(),
        None => return Err(err!(Syntax, "Expected a command. Type 'help' for a list.")),
    };

    let command = match first.as_str() {
        "agents" => Command::Agents(clamped(next(&mut deque, "agent count")?)?),
        "interval" => Command::Interval(next(&mut deque, "interval")?.to_string()),
        "hours" => {
            let start = next(&mut deque, "'always' or a start time")?;
            if start.eq_ignore_ascii_case("always") {
                Command::AlwaysActive
            } else {
                Command::Hours {
                    start: start.parse()?,
                    end: next(&mut deque, "end time")?.parse()?,
                }
            }
        }
        "column" => parse_column(&mut deque)?,
        "columns" => Command::ToggleColumns,
        "decimals" => Command::Decimals(parse_decimals(next(&mut deque, "decimal places")?)?),
        "types" => Command::Types,
        "show" => Command::Show,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(err!(Syntax, "Unrecognized command '{}'.", other)),
    };

    if let Some(extra) = deque.pop_front() {
        return Err(err!(Syntax, "Unexpected argument '{}'.", extra));
    }
    Ok(command)
}

fn parse_column(deque: &mut VecDeque<&str>) -> Result<Command, errors::Error> {
    let action = next(deque, "column action")?.to_lowercase();
    match action.as_str() {
        "add" => {
            let type_: ColumnType = next(deque, "column type")?.parse()?;
            let length = match deque.front().map(|arg| arg.parse::<i64>()) {
                Some(Ok(n)) => {
                    deque.pop_front();
                    Some(n.max(0) as u64)
                }
                _ => None,
            };
            let column = match deque.pop_front() {
                Some(name) => ColumnSpec::named(name, type_, length),
                None => ColumnSpec::new(type_, length),
            };
            Ok(Command::AddColumn(column))
        }
        "rm" | "remove" => Ok(Command::RemoveColumn(index(deque)?)),
        "type" => Ok(Command::SetColumnType {
            index: index(deque)?,
            type_: next(deque, "column type")?.parse()?,
        }),
        "length" | "len" => Ok(Command::SetColumnLength {
            index: index(deque)?,
            length: clamped(next(deque, "length")?)?,
        }),
        "clear" => Ok(Command::ClearColumns),
        other => Err(err!(Syntax, "Unrecognized column action '{}'.", other)),
    }
}

/// Parses a `TYPE[:LENGTH][:NAME]` column flag, e.g. `varchar:50:payload`.
pub fn parse_column_spec(s: &str) -> Result<ColumnSpec, errors::Error> {
    let mut parts = s.splitn(3, ':');
    let type_: ColumnType = match parts.next() {
        Some(t) if !t.trim().is_empty() => t.parse()?,
        _ => return Err(err!(Syntax, "Expected TYPE[:LENGTH][:NAME], got '{}'", s)),
    };
    let length = match parts.next().map(str::trim) {
        Some("") | None => None,
        Some(len) => Some(clamped(len)?),
    };
    Ok(match parts.next().map(str::trim) {
        Some(name) if !name.is_empty() => ColumnSpec::named(name, type_, length),
        _ => ColumnSpec::new(type_, length),
    })
}

/// Parses a number of decimal places in `0..=MAX_DECIMALS`.
pub fn parse_decimals(s: &str) -> Result<usize, errors::Error> {
    let n: usize = s.trim().parse()?;
    if n > MAX_DECIMALS {
        return Err(err!(
            Syntax,
            "Decimal places must be between 0 and {}, got {}",
            MAX_DECIMALS,
            n
        ));
    }
    Ok(n)
}

fn next<'a>(deque: &mut VecDeque<&'a str>, what: &str) -> Result<&'a str, errors::Error> {
    deque
        .pop_front()
        .ok_or_else(|| err!(Syntax, "Missing {}.", what))
}

fn index(deque: &mut VecDeque<&str>) -> Result<usize, errors::Error> {
    Ok(next(deque, "column index")?.parse()?)
}

/// Negative numbers are clamped to zero.
fn clamped(arg: &str) -> Result<u64, errors::Error> {
    Ok(arg.parse::<i64>()?.max(0) as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_agents() {
        assert_eq!(parse("agents 100").unwrap(), Command::Agents(100));
        assert_eq!(parse("AGENTS -4;").unwrap(), Command::Agents(0));
        assert_eq!(parse("agents many").unwrap_err().code(), 4000);
    }

    #[test]
    fn test_parse_interval_keeps_raw_text() {
        assert_eq!(
            parse("interval 00:00:00").unwrap(),
            Command::Interval("00:00:00".into())
        );
    }

    #[test]
    fn test_parse_hours() {
        assert_eq!(parse("hours always").unwrap(), Command::AlwaysActive);
        assert_eq!(
            parse("hours 22:00 06:00").unwrap(),
            Command::Hours {
                start: TimeOfDay::new(22, 0).unwrap(),
                end: TimeOfDay::new(6, 0).unwrap(),
            }
        );
        assert_eq!(parse("hours 25:00 06:00").unwrap_err().code(), 3000);
        assert_eq!(parse("hours 22:00").unwrap_err().code(), 4000);
    }

    #[test]
    fn test_parse_column_add() {
        assert_eq!(
            parse("column add varchar 50 payload").unwrap(),
            Command::AddColumn(ColumnSpec::named("payload", ColumnType::VARCHAR, Some(50)))
        );
        assert_eq!(
            parse("column add int").unwrap(),
            Command::AddColumn(ColumnSpec::new(ColumnType::INT, None))
        );
        assert_eq!(
            parse("column add text -3").unwrap(),
            Command::AddColumn(ColumnSpec::new(ColumnType::TEXT, Some(0)))
        );
        assert_eq!(parse("column add blob").unwrap_err().code(), 5000);
    }

    #[test]
    fn test_parse_column_edits() {
        assert_eq!(parse("column rm 2").unwrap(), Command::RemoveColumn(2));
        assert_eq!(
            parse("column type 1 uuid").unwrap(),
            Command::SetColumnType {
                index: 1,
                type_: ColumnType::UUID
            }
        );
        assert_eq!(
            parse("column length 1 -10").unwrap(),
            Command::SetColumnLength { index: 1, length: 0 }
        );
        assert_eq!(parse("column clear").unwrap(), Command::ClearColumns);
        assert_eq!(parse("column drop 1").unwrap_err().code(), 4000);
    }

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!(parse("columns").unwrap(), Command::ToggleColumns);
        assert_eq!(parse("decimals 3").unwrap(), Command::Decimals(3));
        assert_eq!(parse("types").unwrap(), Command::Types);
        assert_eq!(parse("show").unwrap(), Command::Show);
        assert_eq!(parse("?").unwrap(), Command::Help);
        assert_eq!(parse("exit").unwrap(), Command::Quit);
    }

    #[test]
    fn test_parse_rejects() {
        assert_eq!(parse("").unwrap_err().code(), 4000);
        assert_eq!(parse("select *").unwrap_err().code(), 4000);
        assert_eq!(parse("show everything").unwrap_err().code(), 4000);
    }

    #[test]
    fn test_parse_decimals_range() {
        assert_eq!(parse("decimals 0").unwrap(), Command::Decimals(0));
        assert_eq!(parse("decimals 20").unwrap(), Command::Decimals(20));
        assert_eq!(parse("decimals 21").unwrap_err().code(), 4000);
        assert_eq!(parse("decimals 70000").unwrap_err().code(), 4000);
        assert_eq!(parse("decimals -1").unwrap_err().code(), 4000);
        assert_eq!(parse_decimals(" 3 ").unwrap(), 3);
    }

    #[test]
    fn test_parse_column_spec() {
        assert_eq!(
            parse_column_spec("varchar:50:payload").unwrap(),
            ColumnSpec::named("payload", ColumnType::VARCHAR, Some(50))
        );
        assert_eq!(
            parse_column_spec("bigint").unwrap(),
            ColumnSpec::new(ColumnType::BIGINT, None)
        );
        assert_eq!(
            parse_column_spec("text::notes").unwrap(),
            ColumnSpec::named("notes", ColumnType::TEXT, None)
        );
        assert_eq!(parse_column_spec("text:abc").unwrap_err().code(), 4000);
        assert_eq!(parse_column_spec("").unwrap_err().code(), 4000);
        assert_eq!(parse_column_spec("money:8").unwrap_err().code(), 5000);
    }

    #[test]
    fn test_is_edit() {
        assert!(Command::Agents(1).is_edit());
        assert!(Command::ToggleColumns.is_edit());
        assert!(!Command::Show.is_edit());
    }
}
