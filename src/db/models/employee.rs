//! Employee Model

use super::serde_helpers;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Employee ID type
pub type EmployeeId = RecordId;

/// Account role, fixed at creation
///
/// Signup always produces a `Manager`; directory creation always produces an
/// `Employee`. No update path carries this field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Manager,
    Employee,
}

impl Role {
    pub fn is_manager(&self) -> bool {
        matches!(self, Role::Manager)
    }
}

/// Employee record
///
/// `hash_pass` is never serialized, so the stored secret cannot leak into a
/// response no matter which handler returns the record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub id: Option<EmployeeId>,
    pub name: String,
    pub email: String,
    pub position: String,
    pub department: String,
    pub phone: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(skip_serializing)]
    pub hash_pass: String,
    pub role: Role,
    pub date_joined: DateTime<Utc>,
}

/// Create employee payload (directory creation; role and password are not
/// caller-chosen)
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeCreate {
    pub name: String,
    pub email: String,
    pub position: String,
    pub department: String,
    pub phone: String,
    #[serde(default)]
    pub skills: Vec<String>,
}

/// Update employee payload; absent fields are left untouched
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skills: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_joined: Option<DateTime<Utc>>,
}

/// Change password payload
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

/// Minimal directory entry used for read-time joins on tasks
#[derive(Debug, Clone, Deserialize)]
pub struct EmployeeRef {
    #[serde(with = "serde_helpers::record_id")]
    pub id: EmployeeId,
    pub name: String,
    pub email: String,
}

impl Employee {
    /// Verify password using argon2
    pub fn verify_password(&self, password: &str) -> Result<bool, argon2::password_hash::Error> {
        use argon2::{
            Argon2,
            password_hash::{PasswordHash, PasswordVerifier},
        };

        let parsed_hash = PasswordHash::new(&self.hash_pass)?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    /// Hash password using argon2
    pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
        use argon2::{
            Argon2,
            password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
        };

        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        let password_hash = argon2.hash_password(password.as_bytes(), &salt)?;
        Ok(password_hash.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_hash_verifies_and_rejects() {
        let hash = Employee::hash_password("hunter2").unwrap();
        let employee = Employee {
            id: None,
            name: "A".into(),
            email: "a@example.com".into(),
            position: "Dev".into(),
            department: "Eng".into(),
            phone: "".into(),
            skills: vec![],
            hash_pass: hash,
            role: Role::Manager,
            date_joined: Utc::now(),
        };

        assert!(employee.verify_password("hunter2").unwrap());
        assert!(!employee.verify_password("wrong").unwrap());
    }

    #[test]
    fn hash_never_serialized() {
        let employee = Employee {
            id: None,
            name: "A".into(),
            email: "a@example.com".into(),
            position: "Dev".into(),
            department: "Eng".into(),
            phone: "".into(),
            skills: vec!["Go".into(), "SQL".into()],
            hash_pass: "$argon2id$secret".into(),
            role: Role::Employee,
            date_joined: Utc::now(),
        };

        let json = serde_json::to_string(&employee).unwrap();
        assert!(!json.contains("argon2id"));
        assert!(!json.contains("hash_pass"));
        assert!(json.contains("\"dateJoined\""));
    }

    #[test]
    fn role_wire_values() {
        assert_eq!(serde_json::to_string(&Role::Manager).unwrap(), "\"Manager\"");
        assert!(serde_json::from_str::<Role>("\"Director\"").is_err());
    }
}
