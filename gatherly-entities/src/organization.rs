use crate::{id::Id, time::Timestamp};

#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Organization {
    pub id          : Id,
    pub name        : String,
    pub slug        : String,
    pub description : String,
    pub verified    : bool,
    pub owners      : Vec<Id>,
    pub members     : Vec<Id>,
    pub tags        : Vec<String>,
    pub created_at  : Timestamp,
}

impl Organization {
    pub fn is_owner(&self, user_id: &Id) -> bool {
        self.owners.contains(user_id)
    }

    pub fn is_owner_or_member(&self, user_id: &Id) -> bool {
        self.is_owner(user_id) || self.members.contains(user_id)
    }
}
