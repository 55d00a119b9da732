//! Category label normalization and presentation lookups.

use std::collections::BTreeSet;
use std::sync::OnceLock;

use regex::Regex;

use crate::models::Tool;

/// Label assigned when a category is missing or normalizes to nothing
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Icon key used for categories missing from [`CATEGORY_ICONS`]
pub const DEFAULT_ICON: &str = "box";

/// Pictographic code point ranges removed from category labels
const PICTOGRAPHIC_RANGES: &[(char, char)] = &[
    ('\u{1F600}', '\u{1F64F}'), // emoticons
    ('\u{1F300}', '\u{1F5FF}'), // symbols & pictographs
    ('\u{1F680}', '\u{1F6FF}'), // transport & map
    ('\u{2600}', '\u{26FF}'),   // misc symbols
    ('\u{2700}', '\u{27BF}'),   // dingbats
    ('\u{FE00}', '\u{FE0F}'),   // variation selectors
    ('\u{200D}', '\u{200D}'),   // zero width joiner
    ('\u{20D0}', '\u{20FF}'),   // combining marks for symbols (keycap)
];

/// Canonical category labels and their icon keys
pub const CATEGORY_ICONS: &[(&str, &str)] = &[
    ("Accounting & Modeling", "calculator"),
    ("Aggregators", "library"),
    ("Api & Security", "shield-check"),
    ("Avatar", "user-circle"),
    ("Career & Education", "briefcase"),
    ("Chat", "message-circle"),
    ("Chat Marketing", "message-square-plus"),
    ("Company Formation", "building"),
    ("Community", "users"),
    ("Compliance & Legal", "gavel"),
    ("Copywriting", "pencil-ruler"),
    ("Crm & Support", "heart-handshake"),
    ("Databases", "database"),
    ("Deployment", "upload-cloud"),
    ("Design & Graphics", "figma"),
    ("Design Resources", "palette"),
    ("Developer Tools", "code-2"),
    ("Email & Marketing", "mail"),
    ("Finance", "dollar-sign"),
    ("For Fun", "gamepad-2"),
    ("Frameworks & Runtimes", "atom"),
    ("Gaming", "swords"),
    ("Generative Art", "image"),
    ("Generative Code", "terminal-square"),
    ("Generative Video", "film"),
    ("Hiring", "user-plus"),
    ("Image Improvement", "sparkles"),
    ("Image Scanning", "camera"),
    ("Incubators & Grants", "piggy-bank"),
    ("Infrastructure As Code & Dns / Cdn", "cloud-cog"),
    ("Inspiration", "lightbulb"),
    ("Investors & Crowdfunding", "trending-up"),
    ("Marketing", "megaphone"),
    ("Monitoring & Logs", "activity"),
    ("Motion Capture", "move-3d"),
    ("Music", "music"),
    ("Naming & Domains", "globe"),
    ("PaaS / FaaS / BaaS / IaaS", "server"),
    ("Payments & Finance", "credit-card"),
    ("Podcasting", "mic"),
    ("Presentation & Video", "presentation"),
    ("Problems & Need-Gap", "search-x"),
    ("Productivity", "zap"),
    ("Productivity & Health", "heart-pulse"),
    ("Professionals & Freelance", "briefcase"),
    ("Programming Languages", "braces"),
    ("Prompt Guides", "book-open"),
    ("Reading & Blogs", "newspaper"),
    ("Research", "search"),
    ("Salary & Equity", "coins"),
    ("School", "school"),
    ("Search & Analytics", "bar-chart-2"),
    ("Self-Improvement", "brain-circuit"),
    ("Social Media", "share-2"),
    ("Software Architecture & Patterns", "architecture"),
    ("Speech-To-Text", "audio-lines"),
    ("Spreadsheets & Docs", "file-spreadsheet"),
    ("Startup", "rocket"),
    ("Startup Freebies", "gift"),
    ("Team Chat & Conference", "messages-square"),
    ("Testing & Qa", "flask-conical"),
    ("Text-To-Speech", "volume-2"),
    ("Text-To-Video", "clapperboard"),
    ("Training & Courses", "graduation-cap"),
    ("Translation", "languages"),
    ("Uncategorized", "box"),
    ("Video Editing", "video"),
    ("Voice Modulation", "waves"),
];

fn is_pictographic(c: char) -> bool {
    PICTOGRAPHIC_RANGES
        .iter()
        .any(|(start, end)| (*start..=*end).contains(&c))
}

/// Uppercase the first character of a token and lowercase the rest
fn title_case_token(token: &str) -> String {
    let mut chars = token.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Normalize a raw category label
///
/// Removes emoji and pictographs, strips every character that is not a word
/// character, whitespace or `&`, then title-cases each whitespace-delimited
/// token regardless of its original casing ("aPI" becomes "Api"). Labels that
/// end up empty fall back to [`UNCATEGORIZED`].
pub fn normalize_category(raw: &str) -> String {
    static RE_SYMBOLS: OnceLock<Regex> = OnceLock::new();
    let re_symbols = RE_SYMBOLS.get_or_init(|| Regex::new(r"[^\w\s&]").unwrap());

    let without_pictographs: String = raw.chars().filter(|c| !is_pictographic(*c)).collect();
    let cleaned = re_symbols.replace_all(&without_pictographs, "");

    let label = cleaned
        .split_whitespace()
        .map(title_case_token)
        .collect::<Vec<_>>()
        .join(" ");

    if label.is_empty() {
        UNCATEGORIZED.to_string()
    } else {
        label
    }
}

/// Icon key for a category label, [`DEFAULT_ICON`] when the label is unknown
pub fn icon_for_category(label: &str) -> &'static str {
    CATEGORY_ICONS
        .iter()
        .find(|(name, _)| *name == label)
        .map(|(_, icon)| *icon)
        .unwrap_or(DEFAULT_ICON)
}

/// Distinct, sorted category labels present in a tool list
pub fn collect_categories(tools: &[Tool]) -> Vec<String> {
    tools
        .iter()
        .filter(|tool| !tool.category.is_empty())
        .map(|tool| tool.category.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
