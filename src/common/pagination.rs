use serde::Serialize;

// Envelope padrão de todas as respostas paginadas da API.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub total_pages: i64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, page: i64, limit: i64, total: i64) -> Self {
        Self {
            items,
            page,
            limit,
            total,
            total_pages: total_pages(total, limit),
        }
    }
}

// totalPages = ceil(total / limit). `page` é 1-based.
pub fn total_pages(total: i64, limit: i64) -> i64 {
    if limit <= 0 {
        return 0;
    }
    (total + limit - 1) / limit
}

pub fn offset(page: i64, limit: i64) -> i64 {
    (page - 1) * limit
}

// Defaults dos parâmetros de paginação das querystrings.
pub fn default_page() -> i64 {
    1
}

pub fn default_limit() -> i64 {
    20
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_pages_is_ceiling_division() {
        assert_eq!(total_pages(0, 20), 0);
        assert_eq!(total_pages(1, 20), 1);
        assert_eq!(total_pages(20, 20), 1);
        assert_eq!(total_pages(21, 20), 2);
        assert_eq!(total_pages(100, 3), 34);
    }

    #[test]
    fn offset_is_one_based() {
        assert_eq!(offset(1, 25), 0);
        assert_eq!(offset(2, 25), 25);
        assert_eq!(offset(4, 10), 30);
    }

    #[test]
    fn page_envelope_carries_computed_total_pages() {
        let page = Page::new(vec![1, 2, 3], 1, 3, 7);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.total, 7);
    }
}
