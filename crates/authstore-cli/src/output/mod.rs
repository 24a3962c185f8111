//! Output formatting module
//!
//! Provides table and JSON output for accounts and sessions.

use authstore_core::{NavigationRoot, Session, UserResponse};
use serde::Serialize;
use std::fmt::Display;
use tabled::{Table, Tabled};

/// Output format enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Invalid format: {}. Use 'table' or 'json'", s)),
        }
    }
}

impl Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// User row for table display
#[derive(Debug, Serialize, Tabled)]
pub struct UserRow {
    #[tabled(rename = "Username")]
    pub username: String,
    #[tabled(rename = "Name")]
    pub name: String,
}

impl From<UserResponse> for UserRow {
    fn from(user: UserResponse) -> Self {
        Self {
            username: user.username,
            name: user.name,
        }
    }
}

/// Session row for table display
#[derive(Debug, Serialize, Tabled)]
pub struct SessionRow {
    #[tabled(rename = "Signed In")]
    pub is_authenticated: bool,
    #[tabled(rename = "Username")]
    pub username: String,
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "Screen")]
    pub navigation: NavigationRoot,
}

impl From<Session> for SessionRow {
    fn from(session: Session) -> Self {
        let navigation = NavigationRoot::from_authenticated(session.is_authenticated);
        let (username, name) = match session.current_user {
            Some(user) => (user.username, user.name),
            None => ("-".to_string(), "-".to_string()),
        };
        Self {
            is_authenticated: session.is_authenticated,
            username,
            name,
            navigation,
        }
    }
}

/// Print data in the specified format
pub fn print_output<T>(data: &[T], format: OutputFormat) -> anyhow::Result<()>
where
    T: Serialize + Tabled,
{
    match format {
        OutputFormat::Table => {
            if data.is_empty() {
                println!("No users found.");
            } else {
                let table = Table::new(data).to_string();
                println!("{}", table);
            }
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(data)?;
            println!("{}", json);
        }
    }
    Ok(())
}

/// Print a single item in the specified format
pub fn print_single<T>(data: &T, format: OutputFormat) -> anyhow::Result<()>
where
    T: Serialize + Tabled,
{
    match format {
        OutputFormat::Table => {
            let table = Table::new([data]).to_string();
            println!("{}", table);
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(data)?;
            println!("{}", json);
        }
    }
    Ok(())
}

/// Print a success message (respects quiet mode)
pub fn print_success(message: &str, quiet: bool) {
    if !quiet {
        println!("{}", colored::Colorize::green(message));
    }
}

/// Print an error message
pub fn print_error(message: &str) {
    eprintln!("{}", colored::Colorize::red(message));
}

/// Print an info message (respects quiet mode)
pub fn print_info(message: &str, quiet: bool) {
    if !quiet {
        println!("{}", message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("table".parse::<OutputFormat>().unwrap(), OutputFormat::Table);
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert!("yaml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_session_row_signed_out() {
        let row = SessionRow::from(Session::default());
        assert!(!row.is_authenticated);
        assert_eq!(row.username, "-");
        assert_eq!(row.navigation, NavigationRoot::Auth);
    }

    #[test]
    fn test_session_row_signed_in() {
        let row = SessionRow::from(Session {
            current_user: Some(UserResponse {
                name: "Alice".to_string(),
                username: "alice".to_string(),
            }),
            is_authenticated: true,
        });
        assert_eq!(row.username, "alice");
        assert_eq!(row.navigation, NavigationRoot::App);

        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["navigation"], "app");
    }
}
