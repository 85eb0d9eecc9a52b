pub const FOLDER_ICON: &str = "FabricFolderFill";
pub const DEFAULT_FILE_ICON: &str = "Page";

/// Application icons keyed by the file extensions they own
const APPLICATION_ICONS: &[(&str, &[&str])] = &[
    ("WordDocument", &["doc", "docm", "docx", "docb", "dot", "dotm", "dotx", "odt", "rtf"]),
    ("ExcelDocument", &["xls", "xlsb", "xlsm", "xlsx", "xlt", "xltm", "xltx", "csv", "ods"]),
    ("PowerPointDocument", &["pot", "potm", "potx", "pps", "ppsm", "ppsx", "ppt", "pptm", "pptx", "odp"]),
    ("OneNoteLogo", &["one", "onepkg", "onetoc", "onetoc2"]),
    ("VisioDocument", &["vsd", "vsdm", "vsdx", "vss", "vst", "vstm", "vstx"]),
    ("ProjectLogo", &["mpp", "mpt"]),
    ("PublisherLogo", &["pub"]),
    ("AccessLogo", &["accdb", "accde", "accdt", "mdb"]),
    ("PDF", &["pdf"]),
    ("TextDocument", &["txt", "log"]),
    ("ZipFolder", &["zip", "7z", "rar", "gz", "tar"]),
    ("Photo2", &["bmp", "gif", "jpeg", "jpg", "png", "svg", "tif", "tiff", "webp"]),
    ("Video", &["avi", "mkv", "mov", "mp4", "mpeg", "mpg", "wmv"]),
    ("MusicInCollection", &["mp3", "wav", "wma", "m4a"]),
    ("Mail", &["eml", "msg"]),
    ("FileHTML", &["htm", "html", "aspx"]),
    ("FileCode", &["cs", "css", "js", "json", "ts", "xml", "rs"]),
];

/// Extension after the last `.`, with any query string removed
pub fn file_extension(path: &str) -> &str {
    let ext = path.rsplit('.').next().unwrap_or_default();
    match ext.find('?') {
        Some(idx) => &ext[..idx],
        None => ext,
    }
}

/// Icon name for an extension (case-insensitive); unknown extensions get `Page`
pub fn icon_for_extension(extension: &str) -> &'static str {
    let ext = extension.to_lowercase();
    APPLICATION_ICONS
        .iter()
        .find(|(_, extensions)| extensions.contains(&ext.as_str()))
        .map(|(icon, _)| *icon)
        .unwrap_or(DEFAULT_FILE_ICON)
}

pub fn file_icon_name(path: &str, is_folder: bool) -> &'static str {
    if is_folder {
        FOLDER_ICON
    } else {
        icon_for_extension(file_extension(path))
    }
}
