// ABOUTME: Thesis storage layer using SQLite
// ABOUTME: Paginated listings, year aggregation, and row-level CRUD

use archive_core::{generate_id, Department, Page, PaginationParams, ThesisStatus};
use archive_storage::StorageError;
use chrono::Utc;
use sqlx::sqlite::SqliteRow;
use sqlx::{QueryBuilder, Row, SqlitePool};
use tracing::debug;

use crate::query::{count_query, page_query, search_text, THESIS_COLUMNS};
use crate::types::{NewThesis, Person, Thesis, ThesisFilter, ThesisUpdate};
use crate::ThesisError;

#[derive(Clone)]
pub struct ThesisStorage {
    pool: SqlitePool,
}

impl ThesisStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Count matching rows, then fetch the requested page under the same predicate
    pub async fn list(
        &self,
        filter: &ThesisFilter,
        params: &PaginationParams,
    ) -> Result<Page<Thesis>, ThesisError> {
        debug!("Listing theses with filter: {:?}", filter);

        let total: i64 = count_query(filter)
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await?;

        let rows = page_query(filter, params.limit(), params.offset())
            .build()
            .fetch_all(&self.pool)
            .await?;

        let data = rows
            .iter()
            .map(|row| self.row_to_thesis(row))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Page::new(data, params, total))
    }

    /// Theses submitted by one user, newest first
    pub async fn list_by_submitter(
        &self,
        user_id: &str,
        params: &PaginationParams,
    ) -> Result<Page<Thesis>, ThesisError> {
        debug!("Listing submissions for user: {}", user_id);

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM theses WHERE submitted_by = ?")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await?;

        let rows = sqlx::query(&format!(
            "SELECT {} FROM theses WHERE submitted_by = ? \
             ORDER BY created_at DESC, id ASC LIMIT ? OFFSET ?",
            THESIS_COLUMNS
        ))
        .bind(user_id)
        .bind(params.limit())
        .bind(params.offset())
        .fetch_all(&self.pool)
        .await?;

        let data = rows
            .iter()
            .map(|row| self.row_to_thesis(row))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Page::new(data, params, total))
    }

    pub async fn get(&self, id: &str) -> Result<Thesis, ThesisError> {
        debug!("Fetching thesis: {}", id);

        let row = sqlx::query(&format!("SELECT {} FROM theses WHERE id = ?", THESIS_COLUMNS))
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        self.row_to_thesis(&row)
    }

    /// Distinct non-null years, newest first
    pub async fn unique_years(&self, department: Option<Department>) -> Result<Vec<i32>, ThesisError> {
        let mut qb = QueryBuilder::new("SELECT DISTINCT year FROM theses WHERE year IS NOT NULL");
        if let Some(department) = department {
            qb.push(" AND department = ");
            qb.push_bind(department.as_str());
        }
        qb.push(" ORDER BY year DESC");

        let years: Vec<i32> = qb.build_query_scalar().fetch_all(&self.pool).await?;
        Ok(years)
    }

    pub async fn insert(
        &self,
        thesis: NewThesis,
        status: ThesisStatus,
        submitted_by: Option<&str>,
    ) -> Result<Thesis, ThesisError> {
        let id = generate_id("thesis");
        let now = Utc::now();

        debug!("Inserting thesis {} with status {}", id, status);

        sqlx::query(
            r#"
            INSERT INTO theses (
                id, title, abstract, authors, advisors, department, program, year,
                pdf_url, shelf_location, status, submitted_by, search_text, created_at, updated_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id)
        .bind(&thesis.title)
        .bind(&thesis.abstract_text)
        .bind(people_to_json(&thesis.authors)?)
        .bind(people_to_json(&thesis.advisors)?)
        .bind(thesis.department.as_str())
        .bind(&thesis.program)
        .bind(thesis.year)
        .bind(&thesis.pdf_url)
        .bind(&thesis.shelf_location)
        .bind(status.as_str())
        .bind(submitted_by)
        .bind(search_text(
            &thesis.title,
            &thesis.authors,
            thesis.abstract_text.as_deref(),
        ))
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?;

        self.get(&id).await
    }

    /// Apply the supplied fields. An empty update leaves the row untouched.
    pub async fn update(&self, id: &str, update: &ThesisUpdate) -> Result<Thesis, ThesisError> {
        if update.is_empty() {
            return self.get(id).await;
        }

        debug!("Updating thesis: {}", id);

        let current = self.get(id).await?;

        // Column names are literals; every value goes through push_bind
        let mut qb = QueryBuilder::new("UPDATE theses SET updated_at = ");
        qb.push_bind(Utc::now());

        if let Some(title) = &update.title {
            qb.push(", title = ");
            qb.push_bind(title.clone());
        }
        if let Some(abstract_text) = &update.abstract_text {
            qb.push(", abstract = ");
            qb.push_bind(abstract_text.clone());
        }
        if let Some(authors) = &update.authors {
            qb.push(", authors = ");
            qb.push_bind(people_to_json(authors)?);
        }
        if let Some(advisors) = &update.advisors {
            qb.push(", advisors = ");
            qb.push_bind(people_to_json(advisors)?);
        }
        if let Some(department) = update.department {
            qb.push(", department = ");
            qb.push_bind(department.as_str());
        }
        if let Some(program) = &update.program {
            qb.push(", program = ");
            qb.push_bind(program.clone());
        }
        if let Some(year) = update.year {
            qb.push(", year = ");
            qb.push_bind(year);
        }
        if let Some(shelf_location) = &update.shelf_location {
            qb.push(", shelf_location = ");
            qb.push_bind(shelf_location.clone());
        }
        if let Some(pdf_url) = &update.pdf_url {
            qb.push(", pdf_url = ");
            qb.push_bind(pdf_url.clone());
        }

        if update.title.is_some() || update.authors.is_some() || update.abstract_text.is_some() {
            let title = update.title.as_deref().unwrap_or(&current.title);
            let authors = update.authors.as_deref().unwrap_or(&current.authors);
            let abstract_text = match &update.abstract_text {
                Some(value) => value.as_deref(),
                None => current.abstract_text.as_deref(),
            };
            qb.push(", search_text = ");
            qb.push_bind(search_text(title, authors, abstract_text));
        }

        qb.push(" WHERE id = ");
        qb.push_bind(id.to_string());

        let result = qb.build().execute(&self.pool).await?;
        if result.rows_affected() == 0 {
            return Err(ThesisError::NotFound);
        }

        self.get(id).await
    }

    /// Move a pending record to `status`. Returns false when the row was no
    /// longer pending (or no longer exists) at write time.
    pub async fn set_status_if_pending(&self, id: &str, status: ThesisStatus) -> Result<bool, ThesisError> {
        debug!("Setting thesis {} status to {}", id, status);

        let result = sqlx::query(
            "UPDATE theses SET status = ?, updated_at = ? WHERE id = ? AND status = 'pending'",
        )
        .bind(status.as_str())
        .bind(Utc::now())
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn delete(&self, id: &str) -> Result<(), ThesisError> {
        debug!("Deleting thesis: {}", id);

        let result = sqlx::query("DELETE FROM theses WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(ThesisError::NotFound);
        }

        Ok(())
    }

    fn row_to_thesis(&self, row: &SqliteRow) -> Result<Thesis, ThesisError> {
        let department: String = row.try_get("department")?;
        let status: String = row.try_get("status")?;
        let authors: Option<String> = row.try_get("authors")?;
        let advisors: Option<String> = row.try_get("advisors")?;

        Ok(Thesis {
            id: row.try_get("id")?,
            title: row.try_get("title")?,
            abstract_text: row.try_get("abstract")?,
            authors: people_from_json(authors.as_deref())?,
            advisors: people_from_json(advisors.as_deref())?,
            department: department
                .parse()
                .map_err(|e: archive_core::ParseEnumError| StorageError::Database(e.to_string()))?,
            program: row.try_get("program")?,
            year: row.try_get("year")?,
            pdf_url: row.try_get("pdf_url")?,
            shelf_location: row.try_get("shelf_location")?,
            status: status
                .parse()
                .map_err(|e: archive_core::ParseEnumError| StorageError::Database(e.to_string()))?,
            submitted_by: row.try_get("submitted_by")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

fn people_to_json(people: &[Person]) -> Result<String, StorageError> {
    Ok(serde_json::to_string(people)?)
}

fn people_from_json(raw: Option<&str>) -> Result<Vec<Person>, StorageError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(Vec::new()),
        Some(text) => Ok(serde_json::from_str(text)?),
    }
}
