// src/common/i18n.rs

use crate::middleware::i18n::Locale;

/// Erros do subsistema de identidade, traduzidos conforme o `Accept-Language`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentityError {
    DuplicateEmail(String),
    InvalidEmail(String),
    PasswordTooShort(usize),
    PasswordRequiresNonAlphanumeric,
    PasswordRequiresDigit,
    PasswordRequiresLower,
    PasswordRequiresUpper,
    LockedOut,
    InvalidCredentials,
}

impl IdentityError {
    pub fn describe(&self, locale: &Locale) -> String {
        match locale.0.as_str() {
            "en" => self.describe_en(),
            _ => self.describe_pt(),
        }
    }

    fn describe_pt(&self) -> String {
        match self {
            Self::DuplicateEmail(email) => format!("O email '{email}' já está sendo utilizado."),
            Self::InvalidEmail(email) => format!("O email '{email}' é inválido."),
            Self::PasswordTooShort(length) => {
                format!("Senhas devem conter ao menos {length} caracteres.")
            }
            Self::PasswordRequiresNonAlphanumeric => {
                "Senhas devem conter ao menos um caracter não alfanumérico.".into()
            }
            Self::PasswordRequiresDigit => "Senhas devem conter ao menos um digito ('0'-'9').".into(),
            Self::PasswordRequiresLower => {
                "Senhas devem conter ao menos um caracter em caixa baixa ('a'-'z').".into()
            }
            Self::PasswordRequiresUpper => {
                "Senhas devem conter ao menos um caracter em caixa alta ('A'-'Z').".into()
            }
            Self::LockedOut => "Usuário temporariamente bloqueado por tentativas inválidas".into(),
            Self::InvalidCredentials => "Usuário ou senha incorretos".into(),
        }
    }

    fn describe_en(&self) -> String {
        match self {
            Self::DuplicateEmail(email) => format!("Email '{email}' is already taken."),
            Self::InvalidEmail(email) => format!("Email '{email}' is invalid."),
            Self::PasswordTooShort(length) => {
                format!("Passwords must be at least {length} characters.")
            }
            Self::PasswordRequiresNonAlphanumeric => {
                "Passwords must have at least one non alphanumeric character.".into()
            }
            Self::PasswordRequiresDigit => "Passwords must have at least one digit ('0'-'9').".into(),
            Self::PasswordRequiresLower => {
                "Passwords must have at least one lowercase ('a'-'z').".into()
            }
            Self::PasswordRequiresUpper => {
                "Passwords must have at least one uppercase ('A'-'Z').".into()
            }
            Self::LockedOut => "User temporarily locked out after invalid attempts".into(),
            Self::InvalidCredentials => "Invalid user or password".into(),
        }
    }
}
