use validator::{Validate, ValidationError};

#[derive(Deserialize, Debug, Validate)]
pub struct Config {
    database_url: String,
    api_host: Option<String>,
    api_port: Option<usize>,
    /// key used to sign the login tokens
    #[validate(length(min = 32))]
    jwt_secret: String,
    /// lifetime of a login token, revocation is by expiry only
    token_expiry_days: Option<i64>,
    database_pool_size: Option<u32>,
    /// credentials for the admin account seeded on an empty database
    admin_username: Option<String>,
    admin_password: Option<String>,
    /// points awarded per finishing position when a resultado omits them,
    /// e.g. "3,2,1"; positions beyond the list score 0
    #[validate(custom = "validate_scoring_table")]
    puntos_por_posicion: Option<String>,
}

fn validate_scoring_table(table: &str) -> Result<(), ValidationError> {
    match parse_scoring_table(table) {
        Some(_) => Ok(()),
        None => Err(ValidationError::new("puntos_por_posicion")),
    }
}

fn parse_scoring_table(table: &str) -> Option<Vec<i32>> {
    table
        .split(',')
        .map(|p| p.trim().parse::<i32>().ok().filter(|p| *p >= 0))
        .collect()
}

const DEFAULT_SCORING_TABLE: [i32; 3] = [3, 2, 1];

lazy_static! {
    static ref CONFIG: Config = match envy::from_env::<Config>() {
        Ok(config) => match config.validate() {
            Ok(()) => config,
            Err(e) => panic!("invalid environment variable: {}", e),
        },
        Err(error) => panic!("Missing or incorrect environment variable: {}", error),
    };
}

impl Config {
    pub fn database_url() -> &'static str {
        CONFIG.database_url.as_ref()
    }

    pub fn api_host() -> &'static str {
        match &CONFIG.api_host {
            Some(host) => host.as_ref(),
            None => "localhost",
        }
    }

    pub fn api_port() -> usize {
        CONFIG.api_port.unwrap_or(8080)
    }

    pub fn jwt_secret() -> &'static str {
        CONFIG.jwt_secret.as_ref()
    }

    pub fn token_expiry_days() -> i64 {
        CONFIG.token_expiry_days.unwrap_or(7)
    }

    pub fn database_pool_size() -> u32 {
        CONFIG.database_pool_size.unwrap_or(10)
    }

    pub fn admin_account() -> Option<(&'static str, &'static str)> {
        match (&CONFIG.admin_username, &CONFIG.admin_password) {
            (Some(username), Some(password)) => Some((username.as_ref(), password.as_ref())),
            _ => None,
        }
    }

    pub fn scoring_table() -> Vec<i32> {
        CONFIG
            .puntos_por_posicion
            .as_ref()
            .and_then(|table| parse_scoring_table(table))
            .unwrap_or_else(|| DEFAULT_SCORING_TABLE.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scoring_table_accepts_trimmed_entries() {
        assert_eq!(parse_scoring_table("3,2,1"), Some(vec![3, 2, 1]));
        assert_eq!(parse_scoring_table(" 2, 1, 0 "), Some(vec![2, 1, 0]));
    }

    #[test]
    fn scoring_table_rejects_garbage() {
        assert_eq!(parse_scoring_table("3,two,1"), None);
        assert_eq!(parse_scoring_table("3,-2"), None);
        assert_eq!(parse_scoring_table(""), None);
    }
}
