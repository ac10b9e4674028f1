//! ヘッダ行から列位置を解決する
//!
//! ヘッダは自由記述で、グループ（REQUEST / RESULT）とフィールド名の断片を
//! 部分一致（大文字小文字を区別）で判定する。

use std::collections::BTreeMap;

pub const REQUEST_MARKER: &str = "REQUEST";
pub const RESULT_MARKER: &str = "RESULT";
pub const EXPECTED_MARKER: &str = "EXPECTED";

/// 住所フィールド
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    StreetName,
    StreetPrefix,
    BuildingNumber,
    City,
    PostalCode,
    Commune,
    District,
    Province,
}

impl Field {
    pub const ALL: [Field; 8] = [
        Field::StreetName,
        Field::StreetPrefix,
        Field::BuildingNumber,
        Field::City,
        Field::PostalCode,
        Field::Commune,
        Field::District,
        Field::Province,
    ];

    /// リクエストで送るフィールド
    pub const REQUEST: [Field; 5] = [
        Field::StreetName,
        Field::StreetPrefix,
        Field::BuildingNumber,
        Field::City,
        Field::PostalCode,
    ];

    /// ヘッダ判定に使う断片
    pub fn marker(self) -> &'static str {
        match self {
            Field::StreetName => "streetN",
            Field::StreetPrefix => "streetP",
            Field::BuildingNumber => "building",
            Field::City => "city",
            Field::PostalCode => "postal",
            Field::Commune => "commune",
            Field::District => "district",
            Field::Province => "province",
        }
    }

    pub fn is_request_field(self) -> bool {
        Field::REQUEST.contains(&self)
    }
}

/// 列グループ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnGroup {
    Request,
    Result,
}

/// 解決済みの列位置（0始まり）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnIndexes {
    request: BTreeMap<Field, usize>,
    result: BTreeMap<Field, usize>,
}

impl ColumnIndexes {
    /// ヘッダ行を右から左へ走査して解決する
    ///
    /// 同じフィールドに複数のヘッダが一致した場合は最も左の列が残る。
    /// 1つのヘッダが複数の断片に一致した場合はすべて割り当てる。
    pub fn resolve<S: AsRef<str>>(headers: &[S]) -> Self {
        let mut indexes = Self::default();

        for (col, header) in headers.iter().enumerate().rev() {
            let header = header.as_ref();

            if header.contains(REQUEST_MARKER) {
                for field in Field::REQUEST {
                    if header.contains(field.marker()) {
                        indexes.request.insert(field, col);
                    }
                }
            }

            if header.contains(RESULT_MARKER) {
                for field in Field::ALL {
                    if header.contains(field.marker()) {
                        indexes.result.insert(field, col);
                    }
                }
            }
        }

        indexes
    }

    pub fn get(&self, group: ColumnGroup, field: Field) -> Option<usize> {
        match group {
            ColumnGroup::Request => self.request.get(&field).copied(),
            ColumnGroup::Result => self.result.get(&field).copied(),
        }
    }

    pub fn request(&self, field: Field) -> Option<usize> {
        self.get(ColumnGroup::Request, field)
    }

    pub fn result(&self, field: Field) -> Option<usize> {
        self.get(ColumnGroup::Result, field)
    }

    /// 見つからなかったリクエスト列
    pub fn missing_request(&self) -> Vec<Field> {
        Field::REQUEST
            .into_iter()
            .filter(|f| !self.request.contains_key(f))
            .collect()
    }

    /// 見つからなかった結果列
    pub fn missing_result(&self) -> Vec<Field> {
        Field::ALL
            .into_iter()
            .filter(|f| !self.result.contains_key(f))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers() -> Vec<&'static str> {
        vec![
            "id",
            "REQUEST streetName",
            "REQUEST streetPrefix",
            "REQUEST buildingNumber",
            "REQUEST city",
            "REQUEST postalCode",
            "EXPECTED city",
            "RESULT city",
            "EXPECTED postalCode",
            "RESULT postalCode",
            "RESULT province",
        ]
    }

    #[test]
    fn test_resolve_request_columns() {
        let idx = ColumnIndexes::resolve(&headers());
        assert_eq!(idx.request(Field::StreetName), Some(1));
        assert_eq!(idx.request(Field::StreetPrefix), Some(2));
        assert_eq!(idx.request(Field::BuildingNumber), Some(3));
        assert_eq!(idx.request(Field::City), Some(4));
        assert_eq!(idx.request(Field::PostalCode), Some(5));
        assert!(idx.missing_request().is_empty());
    }

    #[test]
    fn test_resolve_result_columns_ignores_expected() {
        let idx = ColumnIndexes::resolve(&headers());
        assert_eq!(idx.result(Field::City), Some(7));
        assert_eq!(idx.result(Field::PostalCode), Some(9));
        assert_eq!(idx.result(Field::Province), Some(10));
        assert_eq!(idx.result(Field::StreetName), None);
    }

    #[test]
    fn test_missing_result_fields_reported() {
        let idx = ColumnIndexes::resolve(&headers());
        let missing = idx.missing_result();
        assert!(missing.contains(&Field::StreetName));
        assert!(missing.contains(&Field::Commune));
        assert!(!missing.contains(&Field::City));
    }

    #[test]
    fn test_leftmost_duplicate_wins() {
        let headers = ["RESULT city (a)", "x", "RESULT city (b)"];
        let idx = ColumnIndexes::resolve(&headers);
        assert_eq!(idx.result(Field::City), Some(0));
    }

    #[test]
    fn test_header_matching_several_fragments() {
        let headers = ["REQUEST city/postal"];
        let idx = ColumnIndexes::resolve(&headers);
        assert_eq!(idx.request(Field::City), Some(0));
        assert_eq!(idx.request(Field::PostalCode), Some(0));
    }

    #[test]
    fn test_matching_is_case_sensitive() {
        let headers = ["request city", "RESULT City"];
        let idx = ColumnIndexes::resolve(&headers);
        assert_eq!(idx.request(Field::City), None);
        assert_eq!(idx.result(Field::City), None);
    }

    #[test]
    fn test_request_group_has_no_commune() {
        let headers = ["REQUEST commune"];
        let idx = ColumnIndexes::resolve(&headers);
        assert_eq!(idx.request(Field::Commune), None);
        assert!(!Field::Commune.is_request_field());
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let first = ColumnIndexes::resolve(&headers());
        let second = ColumnIndexes::resolve(&headers());
        assert_eq!(first, second);
    }

    #[test]
    fn test_unresolved_sheet() {
        let headers = ["foo", "bar"];
        let idx = ColumnIndexes::resolve(&headers);
        assert_eq!(idx.missing_request().len(), 5);
        assert_eq!(idx.missing_result().len(), 8);
    }
}
