use super::*;

impl VerificationTokenRepo for DbConnection<'_> {
    fn replace_verification_token(&self, token: VerificationToken) -> Result<()> {
        self.write(|data| {
            data.tokens
                .retain(|_, t| !(t.email == token.email && t.kind == token.kind));
            data.tokens.insert(token.token.clone(), token);
            Ok(())
        })
    }
    fn get_verification_token(&self, token: &str) -> Result<VerificationToken> {
        self.read(|data| data.tokens.get(token).cloned())
            .ok_or(repo::Error::NotFound)
    }
    fn delete_verification_token(&self, token: &str) -> Result<()> {
        self.write(|data| {
            data.tokens
                .remove(token)
                .map(|_| ())
                .ok_or(repo::Error::NotFound)
        })
    }
    fn delete_expired_verification_tokens(&self, expired_before: Timestamp) -> Result<usize> {
        self.write(|data| {
            let len_before = data.tokens.len();
            data.tokens.retain(|_, t| t.expires_at >= expired_before);
            let len_after = data.tokens.len();
            debug_assert!(len_before >= len_after);
            Ok(len_before - len_after)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Connections;

    fn token(email: &str, kind: TokenKind, expires_at: Timestamp) -> VerificationToken {
        VerificationToken {
            token: new_token_string(),
            email: EmailAddress::new_unchecked(email.into()),
            kind,
            expires_at,
            created_at: Timestamp::now(),
        }
    }

    #[test]
    fn replace_and_expire_tokens() {
        let connections = Connections::new();
        let now = Timestamp::now();
        let hour = time::Duration::hours(1);
        connections
            .exclusive()
            .unwrap()
            .transaction(|conn| {
                let t1 = token("a@b.org", TokenKind::Email, now + hour);
                conn.replace_verification_token(t1.clone())?;
                let t2 = token("a@b.org", TokenKind::Email, now + hour);
                conn.replace_verification_token(t2.clone())?;
                conn.replace_verification_token(token("a@b.org", TokenKind::Password, now - hour))?;
                assert!(matches!(conn.get_verification_token(&t1.token), Err(repo::Error::NotFound)));
                assert_eq!(conn.get_verification_token(&t2.token)?, t2);
                assert_eq!(conn.delete_expired_verification_tokens(now)?, 1);
                conn.delete_verification_token(&t2.token)?;
                assert!(matches!(
                    conn.delete_verification_token(&t2.token),
                    Err(repo::Error::NotFound)
                ));
                Ok::<_, repo::Error>(())
            })
            .unwrap();
    }
}
