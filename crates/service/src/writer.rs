//! Record synthesis for the create path.

use configs::IdPolicy;
use models::user::{name_or_default, role_or_default, Collection, NewUser, UserRecord};

use crate::errors::ServiceError;

/// Id the next appended record will get.
pub fn next_id(users: &[UserRecord], policy: IdPolicy) -> Result<u64, ServiceError> {
    match policy {
        IdPolicy::Sequential => Ok(users.len() as u64 + 1),
        IdPolicy::NextMax => match users.iter().map(|u| u.id).max() {
            None => Ok(1),
            Some(max) => max.checked_add(1).ok_or(ServiceError::IdExhausted(max)),
        },
    }
}

/// Build a record from `input`, push it onto `users` and return a copy.
/// On error `users` is left untouched.
pub fn append(users: &mut Collection, input: &NewUser, policy: IdPolicy) -> Result<UserRecord, ServiceError> {
    let record = UserRecord {
        id: next_id(users, policy)?,
        name: name_or_default(input.name.as_deref()),
        role: role_or_default(input.role.as_deref()),
    };
    users.push(record.clone());
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::user::seed;

    fn input(name: Option<&str>, role: Option<&str>) -> NewUser {
        NewUser { name: name.map(str::to_string), role: role.map(str::to_string) }
    }

    #[test]
    fn empty_input_gets_defaults() -> Result<(), ServiceError> {
        let mut users = seed();
        let rec = append(&mut users, &input(Some(""), Some("")), IdPolicy::Sequential)?;
        assert_eq!(rec, UserRecord::new(3, "User", "user"));
        assert_eq!(users.last(), Some(&rec));
        Ok(())
    }

    #[test]
    fn sequential_appends_are_consecutive() -> Result<(), ServiceError> {
        let mut users = seed();
        let a = append(&mut users, &input(Some("A"), None), IdPolicy::Sequential)?;
        let b = append(&mut users, &input(Some("B"), Some("ops")), IdPolicy::Sequential)?;
        assert_eq!((a.id, b.id), (3, 4));
        assert_eq!(b.role, "ops");
        assert_eq!(users.len(), 4);
        Ok(())
    }

    #[test]
    fn sequential_collides_with_gapped_ids() -> Result<(), ServiceError> {
        let mut users = vec![UserRecord::new(5, "Bob", "tester")];
        let rec = append(&mut users, &input(Some("Alice"), None), IdPolicy::Sequential)?;
        assert_eq!(rec, UserRecord::new(2, "Alice", "user"));
        Ok(())
    }

    #[test]
    fn next_max_skips_past_highest_id() -> Result<(), ServiceError> {
        let mut users = vec![UserRecord::new(5, "Bob", "tester"), UserRecord::new(2, "Eve", "user")];
        let rec = append(&mut users, &input(Some("Alice"), None), IdPolicy::NextMax)?;
        assert_eq!(rec.id, 6);
        assert_eq!(next_id(&[], IdPolicy::NextMax)?, 1);
        assert_eq!(next_id(&[], IdPolicy::Sequential)?, 1);
        Ok(())
    }

    #[test]
    fn next_max_refuses_to_reuse_the_top_id() {
        let mut users = vec![UserRecord::new(u64::MAX, "Max", "user")];
        let res = append(&mut users, &input(Some("Late"), None), IdPolicy::NextMax);
        assert!(matches!(res, Err(ServiceError::IdExhausted(id)) if id == u64::MAX));
        assert_eq!(users, vec![UserRecord::new(u64::MAX, "Max", "user")]);
    }
}
