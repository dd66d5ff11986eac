use crate::db::blog;
use crate::db::connection::Database;
use crate::domain::blog::BlogPost;
use crate::errors::ServerError;

pub struct BlogService {
    db: Database,
}

impl BlogService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub fn list_posts(&self) -> Result<Vec<BlogPost>, ServerError> {
        self.db.with_conn(|conn| blog::list_posts(conn))
    }

    pub fn get_post(&self, slug: &str) -> Result<BlogPost, ServerError> {
        let slug = slug.trim();
        if slug.is_empty() {
            return Err(ServerError::BadRequest("missing slug".into()));
        }
        self.db
            .with_conn(|conn| blog::find_post_by_slug(conn, slug))?
            .ok_or_else(|| ServerError::NotFound("Post not found.".into()))
    }

    pub fn import_posts(&self, posts: &[BlogPost]) -> Result<usize, ServerError> {
        self.db.with_conn(|conn| {
            let tx = conn.transaction()?;
            for post in posts {
                blog::insert_post(&tx, post)?;
            }
            tx.commit()?;
            Ok(posts.len())
        })
    }
}
