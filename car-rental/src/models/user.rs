//! Application users and their role

use chrono::NaiveDate;
use serde::Deserialize;

use super::form::{date, format_date, required_text, FieldErrors, FormField, FormOptions};

/// Role given to users created without an explicit choice.
pub const DEFAULT_ROLE: &str = "User";

/// A stored user account.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct User {
    pub id: String,
    pub user_name: String,
    pub email: String,
    pub password_hash: String,
    pub registration_date: NaiveDate,
    pub role: String,
}

/// A row of the user list.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct UserRow {
    pub id: String,
    pub user_name: String,
    pub email: String,
    pub registration_date: NaiveDate,
    pub role: String,
}

/// Validated account values; `password` is only set on creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserInput {
    pub user_name: String,
    pub email: String,
    pub password: Option<String>,
    pub registration_date: NaiveDate,
    pub role: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct UserForm {
    pub id: String,
    pub user_name: String,
    pub email: String,
    pub password: String,
    pub registration_date: String,
    pub user_role: String,
}

impl Default for UserForm {
    fn default() -> Self {
        Self {
            id: String::new(),
            user_name: String::new(),
            email: String::new(),
            password: String::new(),
            registration_date: format_date(chrono::Local::now().date_naive()),
            user_role: DEFAULT_ROLE.to_string(),
        }
    }
}

impl UserForm {
    #[must_use]
    pub fn from_user(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            user_name: user.user_name.clone(),
            email: user.email.clone(),
            password: String::new(),
            registration_date: format_date(user.registration_date),
            user_role: user.role.clone(),
        }
    }

    /// Validate the form; the password is required and checked only when
    /// `min_password_length` is given (account creation).
    pub fn validate(&self, min_password_length: Option<usize>) -> Result<UserInput, FieldErrors> {
        let mut errors = FieldErrors::new();

        let user_name = required_text(&mut errors, "UserName", "User name", &self.user_name);
        let email = required_text(&mut errors, "Email", "E-mail", &self.email);
        if !email.is_empty() && !is_email(&email) {
            errors.add("Email", "Invalid e-mail address.");
        }

        let password = match min_password_length {
            Some(min) => {
                if self.password.chars().count() < min {
                    errors.add(
                        "Password",
                        format!("Password must be at least {min} characters"),
                    );
                }
                Some(self.password.clone())
            }
            None => None,
        };

        let registration_date = date(
            &mut errors,
            "RegistrationDate",
            "Registration date",
            &self.registration_date,
        );
        let role = required_text(&mut errors, "UserRole", "Role", &self.user_role);

        match registration_date {
            Some(registration_date) if errors.is_empty() => Ok(UserInput {
                user_name,
                email,
                password,
                registration_date,
                role,
            }),
            _ => Err(errors),
        }
    }

    /// Inputs to render; the password input only on the create form.
    #[must_use]
    pub fn fields(
        &self,
        with_password: bool,
        options: &FormOptions,
        errors: &FieldErrors,
    ) -> Vec<FormField> {
        let mut fields = vec![
            FormField::text("UserName", "User name", &self.user_name, errors),
            FormField::email("Email", "E-mail", &self.email, errors),
        ];
        if with_password {
            fields.push(FormField::password("Password", "Password", errors));
        }
        fields.push(FormField::date(
            "RegistrationDate",
            "Registration date",
            &self.registration_date,
            errors,
        ));
        fields.push(FormField::select_values(
            "UserRole",
            "Role",
            &self.user_role,
            &options.roles,
            errors,
        ));
        fields
    }
}

/// Minimal address shape check: one `@`, non-empty local part, dotted domain.
fn is_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> UserForm {
        UserForm {
            user_name: "desk1".to_string(),
            email: "desk1@rental.example".to_string(),
            password: "secret1".to_string(),
            registration_date: "2024-01-15".to_string(),
            ..UserForm::default()
        }
    }

    #[test]
    fn test_defaults() {
        let form = UserForm::default();
        assert_eq!(form.user_role, "User");
        assert_eq!(
            form.registration_date,
            format_date(chrono::Local::now().date_naive())
        );
    }

    #[test]
    fn test_create_requires_password_length() {
        assert!(form().validate(Some(6)).is_ok());

        let short = UserForm {
            password: "12345".to_string(),
            ..form()
        };
        let errors = short.validate(Some(6)).unwrap_err();
        assert!(errors.get("Password").is_some());

        let input = short.validate(None).unwrap();
        assert_eq!(input.password, None);
    }

    #[test]
    fn test_email_shape() {
        assert!(is_email("a@b.co"));
        assert!(!is_email("a@b"));
        assert!(!is_email("@b.co"));
        assert!(!is_email("a b@c.de"));
        assert!(!is_email("a@@c.de"));

        let bad = UserForm {
            email: "not-an-address".to_string(),
            ..form()
        };
        assert_eq!(
            bad.validate(Some(6)).unwrap_err().get("Email"),
            Some("Invalid e-mail address.")
        );
    }

    #[test]
    fn test_fields_hide_password_on_edit() {
        let options = FormOptions {
            roles: vec!["Admin".to_string(), "User".to_string()],
            ..Default::default()
        };
        let errors = FieldErrors::new();
        assert!(form()
            .fields(false, &options, &errors)
            .iter()
            .all(|f| f.name != "Password"));
        let create = form().fields(true, &options, &errors);
        let role = create.iter().find(|f| f.name == "UserRole").unwrap();
        assert!(role.options.iter().any(|o| o.value == "User" && o.selected));
    }
}
