use crate::repositories::*;

/// The complete datastore with all collections.
pub trait Db:
    UserRepo
    + EventRepo
    + CommentRepo
    + RsvpRepo
    + ReactionRepo
    + ReportRepo
    + OrganizationRepo
    + VerificationTokenRepo
    + ContactTicketRepo
{
}

impl<T> Db for T where
    T: UserRepo
        + EventRepo
        + CommentRepo
        + RsvpRepo
        + ReactionRepo
        + ReportRepo
        + OrganizationRepo
        + VerificationTokenRepo
        + ContactTicketRepo
{
}
