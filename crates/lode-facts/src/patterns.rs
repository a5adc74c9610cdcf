//! Compiled pattern tables shared by the analyzer, extractor, and validator.
//!
//! Every table is compiled once on first use. Patterns are written for
//! the `regex` crate: no look-around, `(?i)` where matching ignores case.

use std::sync::LazyLock;

use lode_core::enums::QueryType;
use regex::Regex;

fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .map(|p| Regex::new(p).expect("static pattern compiles"))
        .collect()
}

fn compile_one(pattern: &str) -> Regex {
    Regex::new(pattern).expect("static pattern compiles")
}

// ── Query intent ───────────────────────────────────────────────────

/// Intent patterns per query type, matched against the lowercased query.
pub static QUERY_TYPE_PATTERNS: LazyLock<Vec<(QueryType, Vec<Regex>)>> = LazyLock::new(|| {
    let table: [(QueryType, &[&str]); 8] = [
        (
            QueryType::Factual,
            &[
                r"\b(what|who|when|where|why|how many|how much)\b",
                r"\b(is|are|was|were|does|do|did|can|will|should)\b.*\?",
                r"\b(definition|meaning|define)\b",
                r"\b(fact|facts|information about)\b",
            ],
        ),
        (
            QueryType::CurrentEvents,
            &[
                r"\b(latest|recent|current|today|yesterday|this week|this month|this year)\b",
                r"\b(news|breaking|just happened|recently)\b",
                r"\b(what happened|what's happening|what is happening)\b",
            ],
        ),
        (
            QueryType::HowTo,
            &[
                r"\b(how to|how do|how can|step by step|guide|tutorial)\b",
                r"\b(instruction|instructions|process|method)\b",
                r"\b(learn|study|master|understand)\b",
            ],
        ),
        (
            QueryType::Academic,
            &[
                r"\b(paper|research|study|analysis|study of|theory)\b",
                r"\b(arxiv|journal|academic|scholar|scientific)\b",
                r"\b(hypothesis|experiment|results|conclusion)\b",
            ],
        ),
        (
            QueryType::Opinion,
            &[
                r"\b(what do you think|your opinion|do you agree|should we|is it good)\b",
                r"\b(best|worst|better|worse|prefer)\b",
                r"\b(review|rating|recommend|suggest)\b",
            ],
        ),
        (
            QueryType::PriceInfo,
            &[
                r"\b(price|cost|how much|expensive|cheap|affordable)\b",
                r"\b(buy|purchase|order|sell|market)\b",
                r"(\bdollar\b|\busd\b|\beur\b|\bpound\b|¥|\brupee\b)",
            ],
        ),
        (
            QueryType::Technical,
            &[
                r"\b(code|programming|software|algorithm|database|api)\b",
                r"\b(error|bug|issue|problem|solution)\b",
                r"\b(python|javascript|java|sql|html|css)\b|c\+\+",
            ],
        ),
        (
            QueryType::Definition,
            &[
                r"\b(what is|what are|define|definition|meaning)\b",
                r"\b(explain|elaborate|describe)\b",
                r"\b(who is|what does)\b",
            ],
        ),
    ];
    table
        .into_iter()
        .map(|(ty, patterns)| (ty, compile(patterns)))
        .collect()
});

/// Words never used as search terms.
pub const STOP_WORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by",
    "from", "up", "about", "into", "through", "during", "before", "after", "above", "below",
    "between", "among", "is", "are", "was", "were", "be", "been", "being", "have", "has", "had",
    "do", "does", "did", "will", "would", "could", "should", "may", "might", "must", "can", "this",
    "that", "these", "those", "i", "you", "he", "she", "it", "we", "they", "me", "him", "her",
    "us", "them", "my", "your", "his", "its", "our", "their", "what", "who", "when", "where",
    "why", "how",
];

/// Honorifics that precede a name but are not names themselves.
pub const HONORIFICS: &[&str] = &["dr", "mr", "mrs", "ms", "prof"];

pub static WORD: LazyLock<Regex> = LazyLock::new(|| compile_one(r"\b\w+\b"));

pub static CAPITALIZED_WORD: LazyLock<Regex> = LazyLock::new(|| compile_one(r"\b[A-Z][a-z]+\b"));

// ── Query entity vocabularies (case-insensitive) ───────────────────

pub static QUERY_TECHNOLOGIES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile(&[
        r"(?i)\b(python|javascript|java|react|angular|vue|node\.js|django|flask)\b|(?i)c\+\+",
        r"(?i)\b(ai|ml|deep learning|machine learning|neural network|tensorflow|pytorch)\b",
        r"(?i)\b(api|rest|graphql|json|xml|sql|mongodb|postgresql)\b",
        r"(?i)\b(linux|windows|macos|ubuntu|debian|centos|docker|kubernetes)\b",
    ])
});

pub static QUERY_PLACES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile(&[
        r"(?i)\b(usa|united states|america|uk|united kingdom|canada|australia|germany|france|italy|spain|japan|china|india|brazil|mexico)\b",
        r"(?i)\b(new york|london|paris|tokyo|beijing|delhi|mumbai|los angeles|chicago|houston|philadelphia|phoenix|san antonio|san diego|dallas|san jose)\b",
    ])
});

pub static QUERY_ORGANIZATIONS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile(&[
        r"(?i)\b(google|microsoft|apple|amazon|facebook|meta|netflix|tesla|nvidia|intel|amd|ibm|oracle|adobe|uber|airbnb|twitter|linkedin|youtube)\b",
        r"(?i)\b(university|college|institute|school|company|corporation|organization)\b",
    ])
});

pub static QUERY_CONCEPTS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile(&[
        r"(?i)\b(climate change|artificial intelligence|machine learning|deep learning|quantum computing|blockchain|cryptocurrency)\b",
        r"(?i)\b(global warming|renewable energy|sustainable development|social media|digital transformation)\b",
    ])
});

// ── Fact shapes ────────────────────────────────────────────────────

/// Kind of statement a fact pattern recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FactShape {
    Definition,
    Date,
    Location,
    Quantitative,
    Comparison,
}

/// Sentence shapes that make a span of text a fact candidate.
pub static FACT_PATTERNS: LazyLock<Vec<(FactShape, Vec<Regex>)>> = LazyLock::new(|| {
    let table: [(FactShape, &[&str]); 5] = [
        (
            FactShape::Definition,
            &[
                r"(?i)(.*?) is (.*?)(?:\.|,|\n|$)",
                r"(?i)(.*?) are (.*?)(?:\.|,|\n|$)",
                r"(?i)The definition of (.*?) is (.*?)(?:\.|,|\n|$)",
                r"(?i)(.*?) means (.*?)(?:\.|,|\n|$)",
            ],
        ),
        (
            FactShape::Date,
            &[
                r"(?i)(\d{4}) saw (.*?)(?:\.|,|\n|$)",
                r"(?i)In (\d{4}), (.*?)(?:\.|,|\n|$)",
                r"(?i)(\d{4}) is when (.*?)(?:\.|,|\n|$)",
                r"(?i)Born in (\d{4}), (.*?)(?:\.|,|\n|$)",
            ],
        ),
        (
            FactShape::Location,
            &[
                r"(?i)(.*?) is located in (.*?)(?:\.|,|\n|$)",
                r"(?i)(.*?) is in (.*?)(?:\.|,|\n|$)",
                r"(?i)From (.*?), (.*?)(?:\.|,|\n|$)",
                r"(?i)Located in (.*?), (.*?)(?:\.|,|\n|$)",
            ],
        ),
        (
            FactShape::Quantitative,
            &[
                r"(?i)(\d+(?:\.\d+)?) (.*?)(?:\.|,|\n|$)",
                r"(?i)(.*?) (?:costs|prices?) (\$?\d+(?:\.\d+)?)(?:\.|,|\n|$)",
                r"(?i)(.*?) has (\d+) (.*?)(?:\.|,|\n|$)",
            ],
        ),
        (
            FactShape::Comparison,
            &[
                r"(?i)(.*?) is (?:better|worse|larger|smaller|older|younger) than (.*?)(?:\.|,|\n|$)",
                r"(?i)(.*?) versus (.*?)(?:\.|,|\n|$)",
                r"(?i)(.*?) compared to (.*?)(?:\.|,|\n|$)",
            ],
        ),
    ];
    table
        .into_iter()
        .map(|(shape, patterns)| (shape, compile(patterns)))
        .collect()
});

/// Whether any fact shape matches somewhere in `text`.
pub fn matches_any_fact_shape(text: &str) -> bool {
    FACT_PATTERNS
        .iter()
        .flat_map(|(_, patterns)| patterns)
        .any(|p| p.is_match(text))
}

// ── Text entities ──────────────────────────────────────────────────

/// Entity shapes looked for inside result text. Vocabulary lists ignore
/// case; name shapes rely on capitalization and do not.
pub static ENTITY_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile(&[
        // people
        r"\b[A-Z][a-z]+ [A-Z][a-z]+\b",
        r"\b(?:Dr|Mr|Mrs|Ms|Prof)\. [A-Z][a-z]+\b",
        r"\b(?:CEO|CTO|CFO|Founder|President|Leader|Director|Manager) [A-Z][a-z]+\b",
        // organizations
        r"(?i)\b(?:google|microsoft|apple|amazon|facebook|meta|netflix|tesla|nvidia|intel|amd|ibm|oracle|adobe|uber|airbnb|twitter|linkedin|youtube)\b",
        r"\b(?:University|College|Institute|School) of [A-Z][a-z]+(?:\s+[A-Z][a-z]+)*\b",
        r"\b[A-Z][a-z]+(?:&[A-Z][a-z]+)? (?:Inc|Corp|LLC|Ltd|Company)\b",
        // places
        r"(?i)\b(?:new york|london|paris|tokyo|beijing|delhi|mumbai|los angeles|chicago|houston|philadelphia|phoenix|san antonio|san diego|dallas|san jose)\b",
        r"(?i)\b(?:usa|united states|uk|united kingdom|canada|australia|germany|france|italy|spain|japan|china|india|brazil|mexico)\b",
        r"\b[A-Z][a-z]+(?:\s+[A-Z][a-z]+)*, [A-Z][a-z]+\b",
        // technologies
        r"(?i)\b(?:python|javascript|java|react|angular|vue|node\.js|django|flask)\b|(?i)c\+\+",
        r"(?i)\b(?:ai|ml|deep learning|machine learning|neural network|tensorflow|pytorch)\b",
        r"(?i)\b(?:api|rest|graphql|json|xml|sql|mongodb|postgresql)\b",
        r"(?i)\b(?:linux|windows|macos|ubuntu|debian|centos|docker|kubernetes)\b",
        // dates
        r"\b\d{4}\b",
        r"(?i)\b(?:january|february|march|april|may|june|july|august|september|october|november|december) \d{1,2}, \d{4}\b",
        r"\b\d{1,2}/\d{1,2}/\d{4}\b",
        r"\b\d{4}-\d{2}-\d{2}\b",
    ])
});

pub static PERSON_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    compile_one(r"^(?:[A-Z][a-z]+ [A-Z][a-z]+\b|(?:Dr|Mr|Mrs|Ms|Prof)\.)")
});

pub static PLACE_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| compile_one(r"^[A-Z][a-z]+(?:\s+[A-Z][a-z]+)*, [A-Z][a-z]+\b"));

pub const PLACE_INDICATORS: &[&str] = &["city", "state", "country", "county", "town", "village"];

pub const KNOWN_PLACES: &[&str] = &[
    "usa", "united states", "america", "uk", "united kingdom", "canada", "australia", "germany",
    "france", "italy", "spain", "japan", "china", "india", "brazil", "mexico", "new york",
    "london", "paris", "tokyo", "beijing", "delhi", "mumbai", "los angeles", "chicago", "houston",
    "philadelphia", "phoenix", "san antonio", "san diego", "dallas", "san jose",
];

pub const ORGANIZATION_INDICATORS: &[&str] = &[
    "inc", "corp", "llc", "ltd", "company", "university", "college", "institute",
];

pub const KNOWN_ORGANIZATIONS: &[&str] = &[
    "google", "microsoft", "apple", "amazon", "facebook", "meta", "netflix", "tesla", "nvidia",
    "intel", "amd", "ibm", "oracle", "adobe", "uber", "airbnb", "twitter", "linkedin", "youtube",
];

// ── Validation ─────────────────────────────────────────────────────

/// Structural checks used by the validator, in the order that decides
/// the reported method.
pub static VALIDATION_PATTERNS: LazyLock<Vec<(ValidationShape, Vec<Regex>)>> =
    LazyLock::new(|| {
        let table: [(ValidationShape, &[&str]); 3] = [
            (
                ValidationShape::Definition,
                &[
                    r"(?i)(.*?) is (.*?)(?:\.|,|\n|$)",
                    r"(?i)(.*?) are (.*?)(?:\.|,|\n|$)",
                ],
            ),
            (
                ValidationShape::Quantitative,
                &[
                    r"(?i)(\d+(?:\.\d+)?) (.*?)(?:\.|,|\n|$)",
                    r"(?i)(.*?) (?:costs|prices?) (\$?\d+(?:\.\d+)?)",
                ],
            ),
            (
                ValidationShape::DateFact,
                &[
                    r"\d{4}",
                    r"(?i)(?:january|february|march|april|may|june|july|august|september|october|november|december) \d{1,2}, \d{4}",
                ],
            ),
        ];
        table
            .into_iter()
            .map(|(shape, patterns)| (shape, compile(patterns)))
            .collect()
    });

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationShape {
    Definition,
    Quantitative,
    DateFact,
}

pub static MONTH_NAME: LazyLock<Regex> = LazyLock::new(|| {
    compile_one(
        r"(?i)\b(?:january|february|march|april|may|june|july|august|september|october|november|december)\b",
    )
});

/// Pairs of opposing markers: a fact carrying one side contradicts a
/// related fact carrying the other. Applied to lowercased text.
pub static CONTRADICTION_PAIRS: LazyLock<Vec<(Regex, Regex)>> = LazyLock::new(|| {
    [
        (r"\b(not|never|nothing|no one)\b", r"\b(yes|always|everyone|all)\b"),
        (r"\b(is|are|was|were)\b", r"\b(is not|are not|was not|were not)\b"),
        (r"\b(true|fact)\b", r"\b(false|myth|incorrect)\b"),
        (r"\b(correct|right|accurate)\b", r"\b(incorrect|wrong|inaccurate)\b"),
        (r"\byes\b", r"\bno\b"),
        (r"\ball\b", r"\bnone\b"),
        (r"\balways\b", r"\bnever\b"),
    ]
    .into_iter()
    .map(|(a, b)| (compile_one(a), compile_one(b)))
    .collect()
});

pub static YEAR: LazyLock<Regex> = LazyLock::new(|| compile_one(r"\b\d{4}\b"));

pub static NUMBER: LazyLock<Regex> = LazyLock::new(|| compile_one(r"\d+(?:\.\d+)?"));

pub static DIGITS: LazyLock<Regex> = LazyLock::new(|| compile_one(r"\d+"));

pub static HTML_TAG: LazyLock<Regex> = LazyLock::new(|| compile_one(r"<[^>]+>"));

pub static SENTENCE_BREAK: LazyLock<Regex> = LazyLock::new(|| compile_one(r"[.!?]+"));

pub static NON_WORD: LazyLock<Regex> = LazyLock::new(|| compile_one(r"[^\w\s]"));
