// Bearer-token configuration for the Canvas API. Loaded once at startup and
// read-only afterwards; a run without working credentials is fatal.
use dialoguer::{Confirm, Input};
use keyring::Entry;
use serde::{Deserialize, Serialize};
use std::process::exit;

/// Base URL and API token for a Canvas instance.
///
/// `base_url` points at the API root, e.g.
/// `https://canvas.uautonoma.cl/api/v1`.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
pub struct Credentials {
    pub base_url: String,
    pub token: String,
}

// Where the credentials were found, if anywhere.
enum CredentialSource {
    None,
    Environment(Credentials),
    SystemKeyring(Credentials),
}

impl Credentials {
    /// Checks the credentials against `/users/self`.
    ///
    /// Returns the HTTP status on rejection, 0 for transport failures.
    fn validate(base_url: &str, token: &str) -> Result<(), u16> {
        let client = reqwest::blocking::Client::new();
        let result = client
            .get(format!("{}/users/self", base_url))
            .bearer_auth(token)
            .send();

        match result {
            Ok(response) if response.status().is_success() => Ok(()),
            Ok(response) => Err(response.status().as_u16()),
            Err(_) => Err(0),
        }
    }

    /// Loads credentials from `CANVAS_URL` and `CANVAS_TOKEN`.
    pub fn from_env() -> Result<Credentials, String> {
        let base_url = std::env::var("CANVAS_URL")
            .map_err(|_| "CANVAS_URL not set in the environment".to_string())?;
        let token = std::env::var("CANVAS_TOKEN")
            .map_err(|_| "CANVAS_TOKEN not set in the environment".to_string())?;
        Ok(Credentials { base_url, token })
    }

    /// Loads credentials previously stored in the system keyring.
    pub fn from_keyring() -> Result<Credentials, String> {
        let app_name = env!("CARGO_PKG_NAME");
        let base_url = Entry::new(app_name, "CANVAS_URL")
            .and_then(|entry| entry.get_password())
            .map_err(|_| "Error retrieving URL from system keyring".to_string())?;
        let token = Entry::new(app_name, "CANVAS_TOKEN")
            .and_then(|entry| entry.get_password())
            .map_err(|_| "Error retrieving token from system keyring".to_string())?;
        Ok(Credentials { base_url, token })
    }

    fn load() -> CredentialSource {
        match Self::from_env() {
            Ok(credentials) => CredentialSource::Environment(credentials),
            Err(_) => match Self::from_keyring() {
                Ok(credentials) => CredentialSource::SystemKeyring(credentials),
                Err(_) => CredentialSource::None,
            },
        }
    }

    // Prompts for credentials, stores them in the keyring and validates them
    // against the API before accepting.
    fn register_interactively() -> CredentialSource {
        let app_name = env!("CARGO_PKG_NAME");
        loop {
            let wants_to_register = Confirm::new()
                .with_prompt("No Canvas credentials found. Register them now?")
                .default(true)
                .interact()
                .unwrap_or(false);
            if !wants_to_register {
                return CredentialSource::None;
            }

            let base_url: String = match Input::new()
                .with_prompt("Canvas API base URL (e.g. https://canvas.example.edu/api/v1)")
                .interact_text()
            {
                Ok(value) => value,
                Err(_) => return CredentialSource::None,
            };
            let token: String = match Input::new().with_prompt("Canvas API token").interact_text() {
                Ok(value) => value,
                Err(_) => return CredentialSource::None,
            };

            let saved = Entry::new(app_name, "CANVAS_URL")
                .and_then(|entry| entry.set_password(&base_url))
                .and_then(|_| {
                    Entry::new(app_name, "CANVAS_TOKEN")
                        .and_then(|entry| entry.set_password(&token))
                });
            if let Err(e) = saved {
                eprintln!("Error saving credentials to the system keyring: {}", e);
                continue;
            }

            match Self::validate(&base_url, &token) {
                Ok(()) => {
                    return CredentialSource::SystemKeyring(Credentials { base_url, token });
                }
                Err(status) if status == 401 || status == 403 => {
                    println!("Canvas rejected the credentials, try again.");
                }
                Err(status) => {
                    eprintln!("Error accessing Canvas API - status code {}", status);
                    exit(1);
                }
            }
        }
    }

    /// Obtains working credentials or terminates the process.
    ///
    /// Environment variables take precedence over the system keyring; when
    /// neither is available the user is prompted to register a token. The
    /// returned credentials have been validated against the API.
    pub fn obtain() -> Credentials {
        let source = match Self::load() {
            CredentialSource::None => Self::register_interactively(),
            found => found,
        };

        match source {
            CredentialSource::Environment(credentials)
            | CredentialSource::SystemKeyring(credentials) => {
                match Self::validate(&credentials.base_url, &credentials.token) {
                    Ok(()) => credentials,
                    Err(status) => {
                        eprintln!("Error accessing Canvas API - status code {}", status);
                        exit(1);
                    }
                }
            }
            CredentialSource::None => {
                eprintln!("No Canvas credentials available; cannot continue.");
                exit(1);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credentials_initialization() {
        let credentials = Credentials {
            base_url: String::from("https://canvas.example.edu/api/v1"),
            token: String::from("secret-token"),
        };
        assert_eq!(credentials.base_url, "https://canvas.example.edu/api/v1");
        assert_eq!(credentials.token, "secret-token");
    }

    #[test]
    fn from_env_reports_missing_variables() {
        std::env::remove_var("CANVAS_URL");
        std::env::remove_var("CANVAS_TOKEN");
        assert!(Credentials::from_env().is_err());
    }
}
