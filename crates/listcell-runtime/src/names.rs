use listcell_types::{FieldDescriptor, FieldId, FieldType};

/// Normalized logical name of a field.
///
/// Built-in fields appear under several internal names (menu and no-menu
/// variants of the same column); they all resolve to one stored name.
/// Names without an entry are returned unchanged.
pub fn stored_field_name(internal_name: &str) -> &str {
    match internal_name {
        "Title" | "LinkTitle" | "LinkTitleNoMenu" | "LinkTitle2" => "Title",
        "DocIcon" => "DocIcon",
        "FileLeafRef" | "LinkFilename" | "LinkFilenameNoMenu" | "LinkFilename2" => "FileLeafRef",
        "URL" | "URLwMenu" | "URLNoMenu" => "URL",
        "FileRef" | "ServerUrl" | "EncodedAbsUrl" => "FileRef",
        "SelectTitle" | "ID" => "ID",
        "Edit" => "Edit",
        other => other,
    }
}

/// Title columns rendered as a link to the item's display form
pub fn is_title_link(internal_name: &str) -> bool {
    matches!(internal_name, "LinkTitle" | "LinkTitleNoMenu")
}

/// Descriptor with its stored name resolved
pub fn describe_field(
    id: impl Into<FieldId>,
    internal_name: impl Into<String>,
    field_type: FieldType,
) -> FieldDescriptor {
    let internal_name = internal_name.into();
    let stored_name = stored_field_name(&internal_name).to_string();
    FieldDescriptor {
        id: id.into(),
        internal_name,
        stored_name,
        field_type,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variants_share_stored_name() {
        for name in ["Title", "LinkTitle", "LinkTitleNoMenu", "LinkTitle2"] {
            assert_eq!(stored_field_name(name), "Title");
        }
        for name in ["FileLeafRef", "LinkFilename", "LinkFilenameNoMenu", "LinkFilename2"] {
            assert_eq!(stored_field_name(name), "FileLeafRef");
        }
        for name in ["URL", "URLwMenu", "URLNoMenu"] {
            assert_eq!(stored_field_name(name), "URL");
        }
        for name in ["FileRef", "ServerUrl", "EncodedAbsUrl"] {
            assert_eq!(stored_field_name(name), "FileRef");
        }
        assert_eq!(stored_field_name("SelectTitle"), "ID");
        assert_eq!(stored_field_name("DocIcon"), "DocIcon");
        assert_eq!(stored_field_name("Edit"), "Edit");
    }

    #[test]
    fn test_unmapped_name_is_unchanged() {
        for name in ["Project_x0020_Code", "Modified", "linktitle", ""] {
            assert_eq!(stored_field_name(name), name);
        }
    }

    #[test]
    fn test_title_link_variants() {
        assert!(is_title_link("LinkTitle"));
        assert!(is_title_link("LinkTitleNoMenu"));
        assert!(!is_title_link("Title"));
        assert!(!is_title_link("LinkTitle2"));
    }

    #[test]
    fn test_describe_field_resolves_stored_name() {
        let field = describe_field("fa564e0f", "LinkFilenameNoMenu", FieldType::Computed);
        assert_eq!(field.stored_name, "FileLeafRef");
        assert_eq!(field.internal_name, "LinkFilenameNoMenu");
        assert_eq!(field.id.as_str(), "fa564e0f");
    }
}
