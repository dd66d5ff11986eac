// src/db/blog.rs
use crate::domain::blog::BlogPost;
use crate::errors::ServerError;
use rusqlite::{params, Connection, OptionalExtension, Row};

const BLOG_COLUMNS: &str =
    "id, title, subtitle, body, created_at, author, slug, author_image, tag";

fn row_to_post(row: &Row<'_>) -> rusqlite::Result<BlogPost> {
    Ok(BlogPost {
        id: row.get(0)?,
        title: row.get(1)?,
        subtitle: row.get(2)?,
        body: row.get(3)?,
        created_at: row.get(4)?,
        author: row.get(5)?,
        slug: row.get(6)?,
        author_image: row.get(7)?,
        tag: row.get(8)?,
    })
}

/// All posts, newest first.
pub fn list_posts(conn: &Connection) -> Result<Vec<BlogPost>, ServerError> {
    let sql = format!("select {BLOG_COLUMNS} from blog order by created_at desc, id asc");
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([], row_to_post)?;

    let mut posts = Vec::new();
    for r in rows {
        posts.push(r?);
    }
    Ok(posts)
}

pub fn find_post_by_slug(conn: &Connection, slug: &str) -> Result<Option<BlogPost>, ServerError> {
    let sql = format!("select {BLOG_COLUMNS} from blog where slug = ?1");
    Ok(conn.query_row(&sql, params![slug], row_to_post).optional()?)
}

pub fn insert_post(conn: &Connection, post: &BlogPost) -> Result<(), ServerError> {
    conn.execute(
        r#"
        insert into blog (id, title, subtitle, body, created_at, author, slug, author_image, tag)
        values (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
        "#,
        params![
            &post.id,
            &post.title,
            &post.subtitle,
            &post.body,
            &post.created_at,
            &post.author,
            &post.slug,
            &post.author_image,
            &post.tag,
        ],
    )?;
    Ok(())
}
