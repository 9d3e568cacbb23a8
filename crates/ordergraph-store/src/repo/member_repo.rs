#![allow(clippy::result_large_err)]

use ordergraph_core::errors::OrderGraphError;
use ordergraph_core::model::{Address, Member};
use rusqlite::{Connection, OptionalExtension};

use crate::errors::{from_rusqlite, is_unique_violation, Result};
use crate::rows;

const MEMBER_COLUMNS: &str = "member_id, name, city, street, zipcode";

pub struct MemberRepo;

impl MemberRepo {
    /// Register a new member
    ///
    /// # Errors
    ///
    /// - `DuplicateMember` if the name is taken (checked before inserting)
    /// - `InvalidInput` if the name is blank
    pub fn join(conn: &Connection, name: &str, address: Address) -> Result<Member> {
        let mut member = Member::new(name, address)?;

        if Self::find_by_name(conn, &member.name)?.is_some() {
            return Err(OrderGraphError::DuplicateMember {
                name: member.name,
            }
            .into());
        }

        conn.execute(
            "INSERT INTO member (name, city, street, zipcode) VALUES (?1, ?2, ?3, ?4)",
            rusqlite::params![
                member.name,
                member.address.city,
                member.address.street,
                member.address.zipcode,
            ],
        )
        .map_err(|e| {
            // lost a race with a concurrent join
            if is_unique_violation(&e) {
                OrderGraphError::DuplicateMember {
                    name: member.name.clone(),
                }
                .into()
            } else {
                from_rusqlite(e)
            }
        })?;

        member.id = Some(conn.last_insert_rowid());
        tracing::debug!(member_id = conn.last_insert_rowid(), "member joined");
        Ok(member)
    }

    pub fn find(conn: &Connection, member_id: i64) -> Result<Option<Member>> {
        conn.query_row(
            &format!("SELECT {} FROM member WHERE member_id = ?", MEMBER_COLUMNS),
            [member_id],
            rows::member,
        )
        .optional()
        .map_err(from_rusqlite)
    }

    pub fn find_by_name(conn: &Connection, name: &str) -> Result<Option<Member>> {
        conn.query_row(
            &format!("SELECT {} FROM member WHERE name = ?", MEMBER_COLUMNS),
            [name],
            rows::member,
        )
        .optional()
        .map_err(from_rusqlite)
    }

    /// All members by id
    pub fn list(conn: &Connection) -> Result<Vec<Member>> {
        let mut stmt = conn
            .prepare(&format!(
                "SELECT {} FROM member ORDER BY member_id",
                MEMBER_COLUMNS
            ))
            .map_err(from_rusqlite)?;
        let members = stmt
            .query_map([], rows::member)
            .map_err(from_rusqlite)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(from_rusqlite)?;
        Ok(members)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_in_memory_migrated;
    use ordergraph_core::errors::ExErrorKind;

    fn seoul() -> Address {
        Address::new("Seoul", "Teheran-ro 1", "14464")
    }

    #[test]
    fn test_join_and_find() {
        let conn = open_in_memory_migrated().unwrap();
        let member = MemberRepo::join(&conn, "userA", seoul()).unwrap();

        let id = member.id.unwrap();
        assert_eq!(MemberRepo::find(&conn, id).unwrap(), Some(member.clone()));
        assert_eq!(
            MemberRepo::find_by_name(&conn, "userA").unwrap(),
            Some(member)
        );
        assert_eq!(MemberRepo::find(&conn, id + 1).unwrap(), None);
    }

    #[test]
    fn test_duplicate_name_rejected_before_insert() {
        let conn = open_in_memory_migrated().unwrap();
        MemberRepo::join(&conn, "userA", seoul()).unwrap();

        let err = MemberRepo::join(&conn, "userA", seoul()).unwrap_err();

        assert_eq!(err.kind(), ExErrorKind::DuplicateMember);
        assert!(!err.kind().is_transient());
        assert_eq!(MemberRepo::list(&conn).unwrap().len(), 1);
    }

    #[test]
    fn test_blank_name_rejected() {
        let conn = open_in_memory_migrated().unwrap();
        let err = MemberRepo::join(&conn, " ", seoul()).unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::InvalidInput);
    }
}
