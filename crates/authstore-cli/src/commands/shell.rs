//! Interactive session
//!
//! Keeps one live auth state for the whole run, so `login`, `logout` and
//! `delete` behave like they do inside the app. Reads one command per line.

use anyhow::Result;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};

use super::Context;
use crate::output::{print_error, print_info, print_output, print_single, print_success, SessionRow, UserRow};

const HELP: &str = "\
Commands:
  login <username> <password>
  logout
  register <username> <password> <name...>
  delete                  delete the signed-in account
  whoami
  users
  status
  help
  quit

Quote arguments containing spaces: login \"jane doe\" \"my pass\"";

#[derive(Debug, PartialEq, Eq)]
enum ShellCommand {
    Login { username: String, password: String },
    Logout,
    Register { name: String, username: String, password: String },
    Delete,
    Whoami,
    Users,
    Status,
    Help,
    Quit,
}

/// Parse one input line. Blank lines yield `Ok(None)`.
///
/// Arguments follow shell quoting rules, so `"two words"` is one argument
/// and spaces inside quotes are kept as typed.
fn parse_command(line: &str) -> std::result::Result<Option<ShellCommand>, String> {
    let words = shell_words::split(line).map_err(|e| format!("could not parse input: {}", e))?;
    let Some((verb, args)) = words.split_first() else {
        return Ok(None);
    };

    let command = match (verb.as_str(), args) {
        ("login", [username, password]) => ShellCommand::Login {
            username: username.clone(),
            password: password.clone(),
        },
        ("login", _) => return Err("usage: login <username> <password>".to_string()),
        ("register", [username, password, name @ ..]) if !name.is_empty() => ShellCommand::Register {
            name: name.join(" "),
            username: username.clone(),
            password: password.clone(),
        },
        ("register", _) => return Err("usage: register <username> <password> <name...>".to_string()),
        ("logout", []) => ShellCommand::Logout,
        ("delete", []) => ShellCommand::Delete,
        ("whoami", []) => ShellCommand::Whoami,
        ("users", []) => ShellCommand::Users,
        ("status", []) => ShellCommand::Status,
        ("help", _) => ShellCommand::Help,
        ("quit" | "exit", []) => ShellCommand::Quit,
        (other, _) => return Err(format!("unknown command: {} (try 'help')", other)),
    };

    Ok(Some(command))
}

pub async fn run(ctx: &Context) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    print_info("Type 'help' for commands.", ctx.quiet);

    loop {
        if !ctx.quiet {
            print!("authstore ({})> ", ctx.state.navigation_root());
            std::io::stdout().flush()?;
        }

        let Some(line) = lines.next_line().await? else {
            break;
        };

        match parse_command(&line) {
            Ok(None) => continue,
            Ok(Some(ShellCommand::Quit)) => break,
            Ok(Some(command)) => {
                if let Err(err) = execute(ctx, command).await {
                    print_error(&err.to_string());
                }
            }
            Err(message) => print_error(&message),
        }
    }

    Ok(())
}

async fn execute(ctx: &Context, command: ShellCommand) -> Result<()> {
    let state = &ctx.state;

    match command {
        ShellCommand::Login { username, password } => {
            let user = state.login(&username, &password).await?;
            print_success(&format!("Signed in as {}", user.username), ctx.quiet);
        }
        ShellCommand::Logout => {
            state.logout();
            print_success("Signed out", ctx.quiet);
        }
        ShellCommand::Register { name, username, password } => {
            let user = state.register(&name, &username, &password).await?;
            print_success(&format!("Registered {}", user.username), ctx.quiet);
        }
        ShellCommand::Delete => match state.delete_account().await? {
            Some(user) => print_success(&format!("Deleted account {}", user.username), ctx.quiet),
            None => print_info("Not signed in, nothing deleted", ctx.quiet),
        },
        ShellCommand::Whoami => {
            let user = state.require_user()?;
            println!("{} ({})", user.username, user.name);
        }
        ShellCommand::Users => {
            let rows: Vec<UserRow> = state.users().into_iter().map(UserRow::from).collect();
            print_output(&rows, ctx.format)?;
        }
        ShellCommand::Status => {
            print_single(&SessionRow::from(state.session()), ctx.format)?;
        }
        ShellCommand::Help => println!("{}", HELP),
        ShellCommand::Quit => {}
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_blank_line() {
        assert_eq!(parse_command("").unwrap(), None);
        assert_eq!(parse_command("   ").unwrap(), None);
    }

    #[test]
    fn test_parse_login() {
        assert_eq!(
            parse_command("login admin admin").unwrap(),
            Some(ShellCommand::Login {
                username: "admin".to_string(),
                password: "admin".to_string(),
            })
        );
        assert!(parse_command("login admin").is_err());
    }

    #[test]
    fn test_parse_register_joins_name() {
        assert_eq!(
            parse_command("register alice pw Alice Liddell").unwrap(),
            Some(ShellCommand::Register {
                name: "Alice Liddell".to_string(),
                username: "alice".to_string(),
                password: "pw".to_string(),
            })
        );
        assert!(parse_command("register alice pw").is_err());
    }

    #[test]
    fn test_parse_quoted_arguments_keep_spaces() {
        assert_eq!(
            parse_command(r#"login "jane  doe" ' pass word '"#).unwrap(),
            Some(ShellCommand::Login {
                username: "jane  doe".to_string(),
                password: " pass word ".to_string(),
            })
        );
        assert_eq!(
            parse_command(r#"register jd "a b" "Jane Doe""#).unwrap(),
            Some(ShellCommand::Register {
                name: "Jane Doe".to_string(),
                username: "jd".to_string(),
                password: "a b".to_string(),
            })
        );
        assert!(parse_command(r#"login "unterminated"#).is_err());
    }

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!(parse_command("logout").unwrap(), Some(ShellCommand::Logout));
        assert_eq!(parse_command("delete").unwrap(), Some(ShellCommand::Delete));
        assert_eq!(parse_command("exit").unwrap(), Some(ShellCommand::Quit));
        assert!(parse_command("logout now").is_err());
        assert!(parse_command("frobnicate").is_err());
    }
}
