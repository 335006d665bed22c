//! Pure permission predicates.
//!
//! Every capability is an explicit role membership check.
//! `OrgAdmin` carries no moderation rights.

use std::time::Duration;

use super::Principal;
use crate::entities::*;

const fn is_staff(role: Role) -> bool {
    matches!(role, Role::Moderator | Role::Admin)
}

pub fn can_edit_event(principal: &Principal, event: &Event) -> bool {
    event.is_organized_by_user(&principal.user_id) || is_staff(principal.role)
}

pub fn can_delete_event(principal: &Principal, event: &Event) -> bool {
    event.is_organized_by_user(&principal.user_id) || principal.role == Role::Admin
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentEditDenied {
    NotAuthor,
    EditWindowExpired,
}

pub fn check_comment_edit(
    principal: &Principal,
    comment: &Comment,
    now: Timestamp,
    edit_window: Duration,
) -> Result<(), CommentEditDenied> {
    if principal.user_id != comment.author_id {
        return Err(CommentEditDenied::NotAuthor);
    }
    if now > comment.created_at + edit_window {
        return Err(CommentEditDenied::EditWindowExpired);
    }
    Ok(())
}

pub fn can_edit_comment(
    principal: &Principal,
    comment: &Comment,
    now: Timestamp,
    edit_window: Duration,
) -> bool {
    check_comment_edit(principal, comment, now, edit_window).is_ok()
}

pub fn can_delete_comment(principal: &Principal, comment: &Comment) -> bool {
    principal.user_id == comment.author_id || is_staff(principal.role)
}

pub const fn can_moderate(principal: &Principal) -> bool {
    is_staff(principal.role)
}

pub const fn can_resolve_report(principal: &Principal) -> bool {
    is_staff(principal.role)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gatherly_entities::builders::*;

    const WINDOW: Duration = Duration::from_secs(15 * 60);

    fn principal(role: Role) -> Principal {
        Principal {
            user_id: Id::new(),
            role,
            email_verified: true,
        }
    }

    #[test]
    fn edit_and_delete_event() {
        let owner = principal(Role::Member);
        let event = Event::build().organized_by(&owner.user_id).finish();

        assert!(can_edit_event(&owner, &event));
        assert!(can_delete_event(&owner, &event));

        assert!(!can_edit_event(&principal(Role::Member), &event));
        assert!(!can_edit_event(&principal(Role::OrgAdmin), &event));
        assert!(can_edit_event(&principal(Role::Moderator), &event));
        assert!(can_edit_event(&principal(Role::Admin), &event));

        // deletion is stricter than editing
        assert!(!can_delete_event(&principal(Role::Moderator), &event));
        assert!(!can_delete_event(&principal(Role::OrgAdmin), &event));
        assert!(can_delete_event(&principal(Role::Admin), &event));
    }

    #[test]
    fn edit_comment_within_window() {
        let author = principal(Role::Member);
        let created_at = Timestamp::try_from_secs(1_700_000_000).unwrap();
        let comment = Comment::build()
            .author(&author.user_id)
            .created_at(created_at)
            .finish();

        let at = |secs: i64| created_at + time::Duration::seconds(secs);

        assert_eq!(
            check_comment_edit(&author, &comment, at(14 * 60 + 59), WINDOW),
            Ok(())
        );
        assert_eq!(check_comment_edit(&author, &comment, at(15 * 60), WINDOW), Ok(()));
        assert_eq!(
            check_comment_edit(&author, &comment, at(15 * 60 + 1), WINDOW),
            Err(CommentEditDenied::EditWindowExpired)
        );
        assert_eq!(
            check_comment_edit(&principal(Role::Admin), &comment, at(0), WINDOW),
            Err(CommentEditDenied::NotAuthor)
        );
        assert!(can_edit_comment(&author, &comment, at(60), WINDOW));
    }

    #[test]
    fn delete_comment() {
        let author = principal(Role::Member);
        let comment = Comment::build().author(&author.user_id).finish();
        assert!(can_delete_comment(&author, &comment));
        assert!(can_delete_comment(&principal(Role::Moderator), &comment));
        assert!(can_delete_comment(&principal(Role::Admin), &comment));
        assert!(!can_delete_comment(&principal(Role::OrgAdmin), &comment));
        assert!(!can_delete_comment(&principal(Role::Member), &comment));
    }

    #[test]
    fn moderation_rights() {
        assert!(!can_moderate(&principal(Role::Member)));
        assert!(!can_moderate(&principal(Role::OrgAdmin)));
        assert!(can_moderate(&principal(Role::Moderator)));
        assert!(can_resolve_report(&principal(Role::Admin)));
        assert!(!can_resolve_report(&principal(Role::OrgAdmin)));
    }
}
