use super::*;

fn key(event_id: &Id, user_id: &Id) -> (Id, Id) {
    (event_id.clone(), user_id.clone())
}

impl RsvpRepo for DbConnection<'_> {
    fn try_get_rsvp(&self, event_id: &Id, user_id: &Id) -> Result<Option<Rsvp>> {
        Ok(self.read(|data| data.rsvps.get(&key(event_id, user_id)).cloned()))
    }

    fn upsert_rsvp(&self, rsvp: &Rsvp) -> Result<Option<RsvpStatus>> {
        self.write(|data| {
            let prev = data
                .rsvps
                .insert(key(&rsvp.event_id, &rsvp.user_id), rsvp.clone());
            Ok(prev.map(|r| r.status))
        })
    }
    fn delete_rsvp(&self, event_id: &Id, user_id: &Id) -> Result<Rsvp> {
        self.write(|data| {
            data.rsvps
                .remove(&key(event_id, user_id))
                .ok_or(repo::Error::NotFound)
        })
    }

    fn count_going_rsvps(&self, event_id: &Id) -> Result<u32> {
        let count = self.read(|data| {
            data.rsvps
                .values()
                .filter(|r| &r.event_id == event_id && r.status.is_going())
                .count()
        });
        u32::try_from(count).map_err(|err| repo::Error::Other(err.into()))
    }
    fn load_rsvps_of_user(&self, user_id: &Id) -> Result<Vec<Rsvp>> {
        Ok(self.read(|data| {
            data.rsvps
                .values()
                .filter(|r| &r.user_id == user_id)
                .cloned()
                .collect()
        }))
    }
}
