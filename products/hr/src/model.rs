use entity::employees;
use serde::{Deserialize, Serialize};

use crate::error::{HrError, HrResult};

const MAX_FIELD_LEN: usize = 255;

/// A persisted employee. Values are immutable snapshots; changes produce new values.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

/// Employee payload without identity. Any `id` in the incoming JSON is ignored.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEmployee {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

/// Replacement values for the three mutable fields.
pub type EmployeeChanges = NewEmployee;

impl NewEmployee {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
        }
    }

    /// Attach an identity, producing the full record value.
    pub fn with_id(self, id: i64) -> Employee {
        Employee {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
        }
    }

    /// Trim every field and reject blanks and malformed emails. Case is kept.
    pub fn validated(self) -> HrResult<Self> {
        Ok(Self {
            first_name: required("firstName", &self.first_name)?,
            last_name: required("lastName", &self.last_name)?,
            email: validate_email(&self.email)?,
        })
    }
}

impl Employee {
    /// Copy with the mutable fields replaced; identity is preserved.
    pub fn with_changes(self, changes: EmployeeChanges) -> Self {
        changes.with_id(self.id)
    }

    pub fn validated(self) -> HrResult<Self> {
        let id = self.id;
        let fields = NewEmployee {
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
        }
        .validated()?;
        Ok(fields.with_id(id))
    }
}

impl From<employees::Model> for Employee {
    fn from(model: employees::Model) -> Self {
        Self {
            id: model.id,
            first_name: model.first_name,
            last_name: model.last_name,
            email: model.email,
        }
    }
}

fn required(field: &str, value: &str) -> HrResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(HrError::InvalidInput(format!("{field} is required")));
    }
    if trimmed.chars().count() > MAX_FIELD_LEN {
        return Err(HrError::InvalidInput(format!(
            "{field} must be <= {MAX_FIELD_LEN} characters"
        )));
    }
    Ok(trimmed.to_string())
}

fn validate_email(value: &str) -> HrResult<String> {
    let email = required("email", value)?;
    if !email.contains('@') {
        return Err(HrError::InvalidInput("Invalid email address".into()));
    }
    Ok(email)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn employee_serializes_camel_case() {
        let employee = Employee {
            id: 7,
            first_name: "Mori".into(),
            last_name: "Java".into(),
            email: "Mori@Java.com".into(),
        };
        assert_eq!(
            serde_json::to_value(&employee).unwrap(),
            json!({"id": 7, "firstName": "Mori", "lastName": "Java", "email": "Mori@Java.com"})
        );
    }

    #[test]
    fn client_supplied_id_is_ignored_on_create() {
        let input: NewEmployee = serde_json::from_value(json!({
            "id": 99,
            "firstName": "Mori",
            "lastName": "Java",
            "email": "Mori@Java.com"
        }))
        .unwrap();
        assert_eq!(input, NewEmployee::new("Mori", "Java", "Mori@Java.com"));
    }

    #[test]
    fn validation_trims_and_keeps_case() {
        let input = NewEmployee::new("  Mori ", "Java", " Mori@Java.com ")
            .validated()
            .unwrap();
        assert_eq!(input.first_name, "Mori");
        assert_eq!(input.email, "Mori@Java.com");
    }

    #[test]
    fn validation_rejects_blank_names_and_bad_emails() {
        let blank = NewEmployee::new(" ", "Java", "mori@java.com").validated();
        assert!(matches!(blank, Err(HrError::InvalidInput(msg)) if msg.contains("firstName")));

        let bad_email = NewEmployee::new("Mori", "Java", "mori.java.com").validated();
        assert!(matches!(bad_email, Err(HrError::InvalidInput(_))));
    }

    #[test]
    fn validation_rejects_overlong_fields() {
        let long = "x".repeat(MAX_FIELD_LEN + 1);
        let err = NewEmployee::new(long.clone(), "Java", "mori@java.com")
            .validated()
            .unwrap_err();
        assert!(matches!(err, HrError::InvalidInput(ref msg) if msg.contains("firstName")));

        let long_email = format!("{}@java.com", "m".repeat(MAX_FIELD_LEN));
        let err = NewEmployee::new("Mori", "Java", long_email).validated().unwrap_err();
        assert!(matches!(err, HrError::InvalidInput(ref msg) if msg.contains("email")));

        let at_limit = "x".repeat(MAX_FIELD_LEN);
        let ok = NewEmployee::new(at_limit.clone(), "Java", "mori@java.com")
            .validated()
            .unwrap();
        assert_eq!(ok.first_name, at_limit);
    }

    #[test]
    fn with_changes_preserves_identity() {
        let employee = Employee {
            id: 3,
            first_name: "Mori".into(),
            last_name: "Java".into(),
            email: "Mori@Java.com".into(),
        };
        let updated = employee.with_changes(NewEmployee::new("LALA", "HAHA", "LALA@HAHA.com"));
        assert_eq!(updated.id, 3);
        assert_eq!(updated.first_name, "LALA");
        assert_eq!(updated.email, "LALA@HAHA.com");
    }
}
