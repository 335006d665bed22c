use super::*;

impl CommentRepo for DbConnection<'_> {
    fn create_comment(&self, comment: Comment) -> Result<()> {
        self.write(|data| {
            if data.comments.contains_key(&comment.id) {
                return Err(repo::Error::AlreadyExists);
            }
            data.comments.insert(comment.id.clone(), comment);
            Ok(())
        })
    }
    fn update_comment(&self, comment: &Comment) -> Result<()> {
        self.write(|data| {
            let existing = data
                .comments
                .get_mut(&comment.id)
                .ok_or(repo::Error::NotFound)?;
            *existing = comment.clone();
            Ok(())
        })
    }

    fn get_comment(&self, id: &Id) -> Result<Comment> {
        self.read(|data| data.comments.get(id).cloned())
            .ok_or(repo::Error::NotFound)
    }
    fn load_comments_of_event(&self, event_id: &Id) -> Result<Vec<Comment>> {
        Ok(self.read(|data| {
            data.comments
                .values()
                .filter(|c| &c.event_id == event_id)
                .cloned()
                .collect()
        }))
    }
    fn count_comments_with_status(&self, status: CommentStatus) -> Result<usize> {
        Ok(self.read(|data| data.comments.values().filter(|c| c.status == status).count()))
    }
}
