use ulid::Ulid;

use crate::limits::MAX_COMMAND_LEN;

/// One parsed kiosk input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Map,
    Legend,
    ListMedia,
    ListResources,
    FindMedia {
        title: String,
    },
    FindResource {
        name: String,
    },
    Book {
        resource: String,
        member: String,
        date: String,
        time: String,
    },
    /// A member's booking on one day.
    Booking {
        resource: String,
        member: String,
        date: String,
    },
    /// Every booking on one day.
    Bookings {
        resource: String,
        date: String,
    },
    Free {
        resource: String,
        date: String,
    },
    Cancel {
        resource: String,
        id: Ulid,
    },
    Help,
    Quit,
}

pub const HELP: &str = "\
Commands:
  map                                          show the library map
  legend                                       show the map legend
  media                                        list catalogued media
  resources                                    list bookable resources
  find media <title>                           route from the kiosk to a media item
  find resource <name>                         route from the kiosk to a resource
  book <resource> <member> <DD/MM/YY> <HH:MM-HH:MM>
                                               book a resource
  booking <resource> <member> <DD/MM/YY>       show a member's booking
  bookings <resource> <DD/MM/YY>               show a day's bookings
  free <resource> <DD/MM/YY>                   show a day's free windows
  cancel <resource> <booking-id>               cancel a booking
  help                                         show this help
  quit                                         leave the kiosk
Use double quotes around names with spaces, e.g. book \"Group Study Room\" alice 01/06/25 12:00-14:00
";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    Empty,
    TooLong(usize),
    UnterminatedQuote,
    Unknown(String),
    WrongArity(&'static str, usize, usize),
    BadId(String),
}

impl std::fmt::Display for CommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommandError::Empty => write!(f, "empty command"),
            CommandError::TooLong(len) => {
                write!(f, "command is {len} bytes, limit is {MAX_COMMAND_LEN}")
            }
            CommandError::UnterminatedQuote => write!(f, "unterminated quote"),
            CommandError::Unknown(word) => write!(f, "unknown command: {word} (try 'help')"),
            CommandError::WrongArity(cmd, expected, got) => {
                write!(f, "{cmd}: expected {expected} arguments, got {got}")
            }
            CommandError::BadId(s) => write!(f, "not a booking id: {s}"),
        }
    }
}

impl std::error::Error for CommandError {}

pub fn parse_command(line: &str) -> Result<Command, CommandError> {
    if line.len() > MAX_COMMAND_LEN {
        return Err(CommandError::TooLong(line.len()));
    }
    let tokens = tokenize(line)?;
    let Some((head, args)) = tokens.split_first() else {
        return Err(CommandError::Empty);
    };

    match head.to_ascii_lowercase().as_str() {
        "map" => no_args("map", args, Command::Map),
        "legend" => no_args("legend", args, Command::Legend),
        "media" => no_args("media", args, Command::ListMedia),
        "resources" => no_args("resources", args, Command::ListResources),
        "help" | "?" => no_args("help", args, Command::Help),
        "quit" | "exit" => no_args("quit", args, Command::Quit),
        "find" => parse_find(args),
        "book" => {
            let [resource, member, date, time] = exact("book", args)?;
            Ok(Command::Book {
                resource,
                member,
                date,
                time,
            })
        }
        "booking" => {
            let [resource, member, date] = exact("booking", args)?;
            Ok(Command::Booking {
                resource,
                member,
                date,
            })
        }
        "bookings" => {
            let [resource, date] = exact("bookings", args)?;
            Ok(Command::Bookings { resource, date })
        }
        "free" => {
            let [resource, date] = exact("free", args)?;
            Ok(Command::Free { resource, date })
        }
        "cancel" => {
            let [resource, id] = exact("cancel", args)?;
            let id = Ulid::from_string(&id).map_err(|_| CommandError::BadId(id))?;
            Ok(Command::Cancel { resource, id })
        }
        _ => Err(CommandError::Unknown(head.clone())),
    }
}

/// `find media|resource <name...>`. Unquoted trailing words are joined with
/// single spaces.
fn parse_find(args: &[String]) -> Result<Command, CommandError> {
    let Some((kind, rest)) = args.split_first() else {
        return Err(CommandError::WrongArity("find", 2, 0));
    };
    if rest.is_empty() {
        return Err(CommandError::WrongArity("find", 2, args.len()));
    }
    let name = rest.join(" ");
    match kind.to_ascii_lowercase().as_str() {
        "media" => Ok(Command::FindMedia { title: name }),
        "resource" => Ok(Command::FindResource { name }),
        _ => Err(CommandError::Unknown(format!("find {kind}"))),
    }
}

fn no_args(cmd: &'static str, args: &[String], command: Command) -> Result<Command, CommandError> {
    if args.is_empty() {
        Ok(command)
    } else {
        Err(CommandError::WrongArity(cmd, 0, args.len()))
    }
}

fn exact<const N: usize>(cmd: &'static str, args: &[String]) -> Result<[String; N], CommandError> {
    <[String; N]>::try_from(args.to_vec()).map_err(|_| CommandError::WrongArity(cmd, N, args.len()))
}

/// Split on whitespace; a double-quoted run is one token, quotes removed.
fn tokenize(line: &str) -> Result<Vec<String>, CommandError> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => {
                in_quotes = !in_quotes;
                in_token = true;
            }
            c if c.is_whitespace() && !in_quotes => {
                if in_token {
                    tokens.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            c => {
                current.push(c);
                in_token = true;
            }
        }
    }
    if in_quotes {
        return Err(CommandError::UnterminatedQuote);
    }
    if in_token {
        tokens.push(current);
    }
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_commands() {
        assert_eq!(parse_command("map").unwrap(), Command::Map);
        assert_eq!(parse_command("  LEGEND ").unwrap(), Command::Legend);
        assert_eq!(parse_command("media").unwrap(), Command::ListMedia);
        assert_eq!(parse_command("resources").unwrap(), Command::ListResources);
        assert_eq!(parse_command("help").unwrap(), Command::Help);
        assert_eq!(parse_command("exit").unwrap(), Command::Quit);
    }

    #[test]
    fn find_joins_unquoted_words() {
        assert_eq!(
            parse_command("find media The Hobbit").unwrap(),
            Command::FindMedia {
                title: "The Hobbit".into()
            }
        );
        assert_eq!(
            parse_command("find resource \"Group Study Room\"").unwrap(),
            Command::FindResource {
                name: "Group Study Room".into()
            }
        );
        assert_eq!(parse_command("find media"), Err(CommandError::WrongArity("find", 2, 1)));
        assert!(matches!(parse_command("find shelf x"), Err(CommandError::Unknown(_))));
    }

    #[test]
    fn book_with_quoted_resource() {
        let cmd = parse_command("book \"Group Study Room\" alice 01/06/25 12:00-14:00").unwrap();
        assert_eq!(
            cmd,
            Command::Book {
                resource: "Group Study Room".into(),
                member: "alice".into(),
                date: "01/06/25".into(),
                time: "12:00-14:00".into(),
            }
        );
    }

    #[test]
    fn book_wrong_arity() {
        assert_eq!(
            parse_command("book Pod1 alice 01/06/25"),
            Err(CommandError::WrongArity("book", 4, 3))
        );
        assert_eq!(
            parse_command("book Group Study Room alice 01/06/25 12:00-14:00"),
            Err(CommandError::WrongArity("book", 4, 6))
        );
    }

    #[test]
    fn day_queries() {
        assert_eq!(
            parse_command("booking Pod1 alice 01/06/25").unwrap(),
            Command::Booking {
                resource: "Pod1".into(),
                member: "alice".into(),
                date: "01/06/25".into()
            }
        );
        assert_eq!(
            parse_command("bookings Pod1 01/06/25").unwrap(),
            Command::Bookings {
                resource: "Pod1".into(),
                date: "01/06/25".into()
            }
        );
        assert_eq!(
            parse_command("free Pod1 01/06/25").unwrap(),
            Command::Free {
                resource: "Pod1".into(),
                date: "01/06/25".into()
            }
        );
    }

    #[test]
    fn cancel_parses_ulid() {
        let id = Ulid::new();
        assert_eq!(
            parse_command(&format!("cancel Pod1 {id}")).unwrap(),
            Command::Cancel {
                resource: "Pod1".into(),
                id
            }
        );
        assert_eq!(
            parse_command("cancel Pod1 nope"),
            Err(CommandError::BadId("nope".into()))
        );
    }

    #[test]
    fn tokenizer_edge_cases() {
        assert_eq!(parse_command(""), Err(CommandError::Empty));
        assert_eq!(parse_command("   \t"), Err(CommandError::Empty));
        assert_eq!(parse_command("find media \"The Hobbit"), Err(CommandError::UnterminatedQuote));
        assert_eq!(tokenize("a \"\" b").unwrap(), vec!["a", "", "b"]);
        assert_eq!(tokenize("say\"hi there\"").unwrap(), vec!["sayhi there"]);
        assert!(matches!(parse_command("dance"), Err(CommandError::Unknown(w)) if w == "dance"));
        assert_eq!(parse_command("map now"), Err(CommandError::WrongArity("map", 0, 1)));
    }

    #[test]
    fn overlong_line_rejected() {
        let line = "x".repeat(MAX_COMMAND_LEN + 1);
        assert_eq!(parse_command(&line), Err(CommandError::TooLong(MAX_COMMAND_LEN + 1)));
    }
}
