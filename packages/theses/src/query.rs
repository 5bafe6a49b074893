// ABOUTME: SQL composition for thesis listings
// ABOUTME: One conjunctive WHERE clause shared by the COUNT and the page SELECT

use sqlx::{QueryBuilder, Sqlite};

use crate::types::{Person, ThesisFilter};

pub(crate) const THESIS_COLUMNS: &str = "id, title, abstract, authors, advisors, department, program, year, \
     pdf_url, shelf_location, status, submitted_by, created_at, updated_at";

/// Escape LIKE wildcards so user text matches literally under `ESCAPE '\'`
pub fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Text the search filter runs against: title, author names, and abstract,
/// one per line, lowercased with full Unicode case folding.
///
/// SQLite's `LOWER()` only folds ASCII, so both the stored text and the
/// pattern are lowered on the Rust side.
pub fn search_text(title: &str, authors: &[Person], abstract_text: Option<&str>) -> String {
    let mut parts: Vec<&str> = Vec::with_capacity(authors.len() + 2);
    parts.push(title);
    parts.extend(authors.iter().map(|author| author.name.as_str()));
    if let Some(abstract_text) = abstract_text {
        parts.push(abstract_text);
    }
    parts.join("\n").to_lowercase()
}

fn push_conjunction(qb: &mut QueryBuilder<'_, Sqlite>, first: &mut bool) {
    qb.push(if *first { " WHERE " } else { " AND " });
    *first = false;
}

/// Append the predicate for every filter that is present
pub(crate) fn push_filters(qb: &mut QueryBuilder<'_, Sqlite>, filter: &ThesisFilter) {
    let mut first = true;

    if let Some(department) = filter.department {
        push_conjunction(qb, &mut first);
        qb.push("department = ");
        qb.push_bind(department.as_str());
    }

    if let Some(program) = &filter.program {
        push_conjunction(qb, &mut first);
        qb.push("program = ");
        qb.push_bind(program.clone());
    }

    if let Some(year) = filter.year {
        push_conjunction(qb, &mut first);
        qb.push("year = ");
        qb.push_bind(year);
    }

    if let Some(search) = &filter.search {
        let pattern = format!("%{}%", escape_like(&search.to_lowercase()));
        push_conjunction(qb, &mut first);
        qb.push("search_text LIKE ");
        qb.push_bind(pattern);
        qb.push(r" ESCAPE '\'");
    }

    if let Some(status) = filter.status {
        push_conjunction(qb, &mut first);
        qb.push("status = ");
        qb.push_bind(status.as_str());
    }
}

/// `SELECT COUNT(*)` under the filter predicate
pub(crate) fn count_query(filter: &ThesisFilter) -> QueryBuilder<'static, Sqlite> {
    let mut qb = QueryBuilder::new("SELECT COUNT(*) FROM theses");
    push_filters(&mut qb, filter);
    qb
}

/// One page of matching rows, newest year first then by title
pub(crate) fn page_query(filter: &ThesisFilter, limit: i64, offset: i64) -> QueryBuilder<'static, Sqlite> {
    let mut qb = QueryBuilder::new(format!("SELECT {} FROM theses", THESIS_COLUMNS));
    push_filters(&mut qb, filter);
    qb.push(" ORDER BY year DESC, title ASC, id ASC LIMIT ");
    qb.push_bind(limit);
    qb.push(" OFFSET ");
    qb.push_bind(offset);
    qb
}
