//! Prompt construction for the generative stage

use shared_types::Flag;

use crate::industry::Industry;

/// Regulatory knowledge block for one vertical.
pub struct RegulatoryContext {
    pub title: &'static str,
    /// (regulatory body or rule, typical concern)
    pub bodies: &'static [(&'static str, &'static str)],
    pub key_concerns: &'static [&'static str],
}

const REAL_ESTATE_CONTEXT: RegulatoryContext = RegulatoryContext {
    title: "Real Estate Marketing Regulations",
    bodies: &[
        ("HUD Fair Housing Act", "Prohibits discriminatory language and steering"),
        ("RESPA", "Regulates settlement services disclosures"),
        ("State licensing laws", "Vary by jurisdiction"),
        ("NAR Code of Ethics", "Professional standards"),
        ("FTC Act", "Prohibits deceptive advertising"),
    ],
    key_concerns: &[
        "Property guarantees",
        "return projections",
        "urgency tactics",
        "discrimination",
    ],
};

const FINANCE_CONTEXT: RegulatoryContext = RegulatoryContext {
    title: "Financial Services Regulations",
    bodies: &[
        ("SEC regulations", "Securities marketing rules"),
        ("FINRA rules", "Broker-dealer advertising standards"),
        ("Investment Advisers Act", "Advisor marketing requirements"),
        ("FTC Act", "Consumer protection"),
    ],
    key_concerns: &[
        "Return guarantees",
        "risk misrepresentation",
        "insider language",
        "testimonials without disclaimers",
    ],
};

const HEALTHCARE_CONTEXT: RegulatoryContext = RegulatoryContext {
    title: "Healthcare Marketing Regulations",
    bodies: &[
        ("FDA regulations", "Drug and device claims"),
        ("FTC Act", "Health product advertising"),
        ("HIPAA", "Patient privacy in marketing"),
        ("State medical board rules", "Practitioner advertising limits"),
    ],
    key_concerns: &[
        "Cure claims",
        "unsubstantiated efficacy",
        "safety misrepresentation",
        "testimonials",
    ],
};

const GENERAL_CONTEXT: RegulatoryContext = RegulatoryContext {
    title: "General Marketing Regulations",
    bodies: &[
        ("FTC Act", "Truth in advertising"),
        ("CAN-SPAM", "Email marketing rules"),
        ("State consumer protection laws", "Unfair and deceptive practices"),
    ],
    key_concerns: &[
        "Superlative claims",
        "false urgency",
        "deceptive pricing",
        "unsubstantiated claims",
    ],
};

/// Grading criteria the model must apply, in order.
pub const GRADING_CRITERIA: &[&str] = &[
    "Specific regulatory violations (FTC, SEC, FINRA, HUD, FDA as applicable)",
    "Misleading or deceptive language",
    "Unsubstantiated claims",
    "False guarantees or promises",
    "Missing disclaimers",
];

/// Instructions for the rewritten document.
pub const REWRITE_GUIDELINES: &[&str] = &[
    "Maintain the marketing intent and persuasive tone",
    "Replace problematic phrases with compliant alternatives",
    "Add necessary disclaimers where appropriate",
    "Keep it natural and engaging, not overly legalistic",
];

const CONTENT_TAG: &str = "marketing_content";

pub fn regulatory_context(industry: Industry) -> &'static RegulatoryContext {
    match industry {
        Industry::RealEstate => &REAL_ESTATE_CONTEXT,
        Industry::Finance => &FINANCE_CONTEXT,
        Industry::Healthcare => &HEALTHCARE_CONTEXT,
        Industry::General => &GENERAL_CONTEXT,
    }
}

impl RegulatoryContext {
    pub fn render(&self) -> String {
        let mut out = format!("{}:\n", self.title);
        for (body, concern) in self.bodies {
            out.push_str(&format!("- {}: {}\n", body, concern));
        }
        out.push_str(&format!("Key concerns: {}", self.key_concerns.join(", ")));
        out
    }
}

/// Render pattern hits as advisory bullets, or `None` when there are none.
pub fn render_pattern_findings(flags: &[Flag]) -> String {
    if flags.is_empty() {
        return "None".to_string();
    }
    flags
        .iter()
        .map(|f| format!("- \"{}\": {}", f.matched_text, f.reason))
        .collect::<Vec<_>>()
        .join("\n")
}

fn numbered(items: &[&str]) -> String {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| format!("{}. {}", i + 1, item))
        .collect::<Vec<_>>()
        .join("\n")
}

fn bulleted(items: &[&str]) -> String {
    items
        .iter()
        .map(|item| format!("- {}", item))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Tag name for the content block that does not occur anywhere in `content`.
pub fn content_tag(content: &str) -> String {
    let mut tag = CONTENT_TAG.to_string();
    let mut suffix = 0u32;
    while content.contains(&format!("<{}>", tag)) || content.contains(&format!("</{}>", tag)) {
        suffix += 1;
        tag = format!("{}_{}", CONTENT_TAG, suffix);
    }
    tag
}

/// Build the full analysis prompt.
///
/// The content is embedded verbatim inside a tag pair chosen so that the
/// content cannot open or close it.
pub fn build_analysis_prompt(content: &str, industry: Industry, pattern_flags: &[Flag]) -> String {
    let tag = content_tag(content);

    format!(
        r#"You are an expert compliance analyst specializing in {industry} marketing regulations.

INDUSTRY CONTEXT:
{context}

CONTENT TO ANALYZE (everything between the <{tag}> tags, verbatim):
<{tag}>
{content}
</{tag}>

INITIAL PATTERN FLAGS FOUND:
{findings}

Analyze this marketing content for compliance issues. Be thorough but fair - not every strong claim is a violation. The initial pattern flags are advisory: confirm or override them. Consider:
{criteria}

For each flag, quote the problematic text exactly as it appears in the content.

For the rewritten content:
{rewrite}"#,
        industry = industry.display_name(),
        context = regulatory_context(industry).render(),
        tag = tag,
        content = content,
        findings = render_pattern_findings(pattern_flags),
        criteria = numbered(GRADING_CRITERIA),
        rewrite = bulleted(REWRITE_GUIDELINES),
    )
}
