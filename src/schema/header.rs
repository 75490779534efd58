//! Matching declared field names against the header row.

use smol_str::SmolStr;

use crate::types::{FieldKind, TypeDesc};

/// Lower-case every header cell in place.
pub fn lowercase_header(header: &mut [String]) {
    for cell in header.iter_mut() {
        if cell.chars().any(char::is_uppercase) {
            *cell = cell.to_lowercase();
        }
    }
}

/// Position of the first header cell equal to `name` lower-cased.
///
/// `header` must already be lower-cased; later duplicates are never found.
pub fn column_index(name: &str, header: &[String]) -> Option<usize> {
    let wanted = name.to_lowercase();
    header.iter().position(|cell| *cell == wanted)
}

/// Lower-case `header`, then resolve each name to its column.
pub fn index_header<'a, I>(header: &mut [String], names: I) -> Vec<(&'a str, Option<usize>)>
where
    I: IntoIterator<Item = &'a str>,
{
    lowercase_header(header);
    names
        .into_iter()
        .map(|name| (name, column_index(name, header)))
        .collect()
}

/// One resolved field of a load.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    pub name: SmolStr,
    pub kind: FieldKind,
    /// `None` when no header cell matches the name.
    pub column: Option<usize>,
    /// Declared type, kept only for map and slice fields.
    pub desc: Option<TypeDesc>,
}

/// Field descriptors in declaration order, built once per load.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RecordSchema {
    fields: Vec<FieldDescriptor>,
}

impl RecordSchema {
    pub fn build<'a, I>(fields: I, header: &mut [String]) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a TypeDesc)>,
    {
        lowercase_header(header);
        let fields = fields
            .into_iter()
            .map(|(name, desc)| {
                let kind = FieldKind::classify(desc);
                FieldDescriptor {
                    name: SmolStr::new(name),
                    kind,
                    column: column_index(name, header),
                    desc: kind.is_composite().then(|| desc.clone()),
                }
            })
            .collect();
        Self { fields }
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Names of declared fields with no matching column.
    pub fn unmatched(&self) -> impl Iterator<Item = &str> {
        self.fields
            .iter()
            .filter(|field| field.column.is_none())
            .map(|field| field.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn header(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|cell| cell.to_string()).collect()
    }

    #[rstest]
    #[case("NAME")]
    #[case("name")]
    #[case("Name")]
    fn test_match_is_case_insensitive(#[case] cell: &str) {
        let mut row = header(&["---", cell]);
        let resolved = index_header(&mut row, ["Name"]);
        assert_eq!(resolved, vec![("Name", Some(1))]);
        assert_eq!(row[1], "name");
    }

    #[rstest]
    fn test_first_duplicate_wins() {
        let mut row = header(&["id", "a", "A", "b"]);
        let resolved = index_header(&mut row, ["a", "b", "e"]);
        assert_eq!(
            resolved,
            vec![("a", Some(1)), ("b", Some(3)), ("e", None)]
        );
    }

    #[rstest]
    fn test_identifier_column_can_match_a_field() {
        let mut row = header(&["Id", "a"]);
        assert_eq!(index_header(&mut row, ["ID"]), vec![("ID", Some(0))]);
    }

    #[rstest]
    fn test_record_schema_keeps_composite_types_only() {
        let fields = [
            (SmolStr::new("A"), TypeDesc::String),
            (SmolStr::new("P"), TypeDesc::slice(TypeDesc::Uint32)),
            (SmolStr::new("D"), TypeDesc::Unsupported("Option".into())),
            (SmolStr::new("E"), TypeDesc::String),
        ];
        let mut row = header(&["---", "a", "p", "d"]);
        let schema = RecordSchema::build(
            fields.iter().map(|(name, desc)| (name.as_str(), desc)),
            &mut row,
        );
        let resolved = schema.fields();
        assert_eq!(schema.len(), 4);
        assert_eq!(resolved[0].column, Some(1));
        assert_eq!(resolved[0].desc, None);
        assert_eq!(resolved[1].kind, FieldKind::Slice);
        assert_eq!(resolved[1].desc, Some(TypeDesc::slice(TypeDesc::Uint32)));
        assert_eq!(resolved[2].kind, FieldKind::Invalid);
        assert_eq!(resolved[2].column, Some(3));
        assert_eq!(schema.unmatched().collect::<Vec<_>>(), vec!["E"]);
    }
}
