use crate::geo::GeoPoint;

#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub place_id          : String,
    pub formatted_address : String,
    pub pos               : GeoPoint,
    pub room_notes        : Option<String>,
}
