use super::*;

fn key(comment_id: &Id, user_id: &Id, emoji: &Emoji) -> (Id, Id, Emoji) {
    (comment_id.clone(), user_id.clone(), emoji.clone())
}

impl ReactionRepo for DbConnection<'_> {
    fn add_reaction(&self, reaction: &Reaction) -> Result<()> {
        self.write(|data| {
            let key = key(&reaction.comment_id, &reaction.user_id, &reaction.emoji);
            if data.reactions.contains_key(&key) {
                return Err(repo::Error::AlreadyExists);
            }
            data.reactions.insert(key, reaction.clone());
            Ok(())
        })
    }
    fn try_get_reaction(
        &self,
        comment_id: &Id,
        user_id: &Id,
        emoji: &Emoji,
    ) -> Result<Option<Reaction>> {
        Ok(self.read(|data| data.reactions.get(&key(comment_id, user_id, emoji)).cloned()))
    }
    fn delete_reaction(&self, comment_id: &Id, user_id: &Id, emoji: &Emoji) -> Result<()> {
        self.write(|data| {
            data.reactions
                .remove(&key(comment_id, user_id, emoji))
                .map(|_| ())
                .ok_or(repo::Error::NotFound)
        })
    }
    fn load_reactions_of_comment(&self, comment_id: &Id) -> Result<Vec<Reaction>> {
        Ok(self.read(|data| {
            data.reactions
                .values()
                .filter(|r| &r.comment_id == comment_id)
                .cloned()
                .collect()
        }))
    }
}
