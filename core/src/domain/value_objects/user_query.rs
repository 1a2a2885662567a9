//! Search and sort options for listing users.

use std::cmp::Ordering;

use mb_shared::validation::split_key_value;

use crate::domain::entities::User;
use crate::errors::DomainError;

/// User attribute that can be searched or sorted on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserField {
    Id,
    Name,
    Email,
}

impl UserField {
    pub fn parse(value: &str) -> Result<Self, DomainError> {
        match value.to_ascii_lowercase().as_str() {
            "id" => Ok(UserField::Id),
            "name" => Ok(UserField::Name),
            "email" => Ok(UserField::Email),
            _ => Err(DomainError::validation(format!(
                "Unknown user field `{}`, expected id, name or email",
                value
            ))),
        }
    }

    /// Column backing this field in the `users` table
    pub fn column(&self) -> &'static str {
        match self {
            UserField::Id => "id",
            UserField::Name => "name",
            UserField::Email => "email",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// An empty direction means ascending
    pub fn parse(value: &str) -> Result<Self, DomainError> {
        match value.to_ascii_lowercase().as_str() {
            "" | "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            _ => Err(DomainError::validation(format!(
                "Unknown sort direction `{}`, expected asc or desc",
                value
            ))),
        }
    }

    pub fn as_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

/// Exact match on one field; text comparison ignores case
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSearch {
    pub field: UserField,
    pub value: String,
}

impl UserSearch {
    pub fn matches(&self, user: &User) -> bool {
        match self.field {
            UserField::Id => user.id.to_string().eq_ignore_ascii_case(&self.value),
            UserField::Name => user.name.to_lowercase() == self.value.to_lowercase(),
            UserField::Email => user.email.to_lowercase() == self.value.to_lowercase(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserSort {
    pub field: UserField,
    pub direction: SortDirection,
}

impl Default for UserSort {
    fn default() -> Self {
        Self {
            field: UserField::Email,
            direction: SortDirection::Asc,
        }
    }
}

impl UserSort {
    /// Orders by the sort field, then by id so equal keys page stably
    pub fn compare(&self, a: &User, b: &User) -> Ordering {
        let ordering = match self.field {
            UserField::Id => a.id.cmp(&b.id),
            UserField::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
            UserField::Email => a.email.cmp(&b.email),
        };
        let ordering = match self.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        };
        ordering.then_with(|| a.id.cmp(&b.id))
    }
}

/// Filter and ordering applied before pagination
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserListQuery {
    pub search: Option<UserSearch>,
    pub sort: UserSort,
}

impl UserListQuery {
    /// Build from raw `search=field:value` and `sort=field:asc|desc` parameters
    ///
    /// A missing or blank parameter, or a search with an empty value, is
    /// ignored. A sort without a direction sorts ascending.
    pub fn parse(search: Option<&str>, sort: Option<&str>) -> Result<Self, DomainError> {
        let search = match search.map(str::trim).filter(|s| !s.is_empty()) {
            None => None,
            Some(raw) => {
                let (field, value) = split_key_value(raw).ok_or_else(|| {
                    DomainError::validation("Search must look like field:value")
                })?;
                let field = UserField::parse(field)?;
                (!value.is_empty()).then(|| UserSearch {
                    field,
                    value: value.to_string(),
                })
            }
        };

        let sort = match sort.map(str::trim).filter(|s| !s.is_empty()) {
            None => UserSort::default(),
            Some(raw) => {
                let (field, direction) = split_key_value(raw).unwrap_or((raw, ""));
                UserSort {
                    field: UserField::parse(field)?,
                    direction: SortDirection::parse(direction)?,
                }
            }
        };

        Ok(Self { search, sort })
    }

    pub fn matches(&self, user: &User) -> bool {
        self.search.as_ref().map_or(true, |search| search.matches(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(name: &str, email: &str) -> User {
        User::new(name.to_string(), email.to_string(), "hash".to_string())
    }

    #[test]
    fn test_defaults_to_email_ascending() {
        let query = UserListQuery::parse(None, Some("  ")).unwrap();
        assert_eq!(query, UserListQuery::default());
        assert_eq!(query.sort.field, UserField::Email);
        assert_eq!(query.sort.direction, SortDirection::Asc);
    }

    #[test]
    fn test_parse_search_and_sort() {
        let query = UserListQuery::parse(Some(" name : Sari Teller "), Some("NAME:desc")).unwrap();
        assert_eq!(
            query.search,
            Some(UserSearch {
                field: UserField::Name,
                value: "Sari Teller".to_string(),
            })
        );
        assert_eq!(query.sort.field, UserField::Name);
        assert_eq!(query.sort.direction, SortDirection::Desc);

        let query = UserListQuery::parse(None, Some("id")).unwrap();
        assert_eq!(query.sort.field, UserField::Id);
        assert_eq!(query.sort.direction, SortDirection::Asc);
    }

    #[test]
    fn test_empty_search_value_is_ignored() {
        let query = UserListQuery::parse(Some("email:"), None).unwrap();
        assert!(query.search.is_none());
    }

    #[test]
    fn test_rejects_malformed_parameters() {
        assert!(matches!(
            UserListQuery::parse(Some("budi"), None),
            Err(DomainError::Validation { .. })
        ));
        assert!(matches!(
            UserListQuery::parse(Some("password_hash:x"), None),
            Err(DomainError::Validation { .. })
        ));
        assert!(matches!(
            UserListQuery::parse(None, Some("email:sideways")),
            Err(DomainError::Validation { .. })
        ));
    }

    #[test]
    fn test_search_matches_exactly_ignoring_case() {
        let sari = user("Sari Teller", "sari@example.com");
        let query = UserListQuery::parse(Some("name:sari teller"), None).unwrap();
        assert!(query.matches(&sari));

        let query = UserListQuery::parse(Some("name:Sari"), None).unwrap();
        assert!(!query.matches(&sari));

        let by_id = format!("id:{}", sari.id);
        let query = UserListQuery::parse(Some(by_id.as_str()), None).unwrap();
        assert!(query.matches(&sari));
    }

    #[test]
    fn test_sort_direction() {
        let a = user("Zed", "a@example.com");
        let b = user("Amy", "b@example.com");

        let by_email = UserSort::default();
        assert_eq!(by_email.compare(&a, &b), Ordering::Less);

        let by_name_desc = UserSort {
            field: UserField::Name,
            direction: SortDirection::Desc,
        };
        assert_eq!(by_name_desc.compare(&a, &b), Ordering::Less);
    }
}
