//! Prompts for extraction, writing and URL finding.
//!
//! Templates use `{placeholder}` markers filled by the `format_*` helpers.

use crate::types::{grant::Grant, organization::Organization};

pub const GRANT_SYSTEM: &str = "You are an expert grant writer and researcher. You will help extract detailed information about grants from web page text.";

/// Per-page grant extraction.
pub const GRANT_EXTRACTION_PROMPT: &str = r#"Extract the following fields about ACTIVE grants only from this page. Please think and reason that this is an actual grant/scholarship opportunity.

1. Grant Name - the grant or funding opportunity name if available, else create a suitable name based on the content if not explicitly mentioned.
2. Funding priorities and interests
3. Types of grant
4. Eligibility criteria
5. Eligible applicants (nonprofits / individuals / small businesses). Identify if nonprofit organizations or small businesses or individuals are eligible for the grant.
6. Eligible funding locations
7. Range of grant amount
8. Specific grant funding amount
9. Proposal deadline
10. Annual or recurring
11. Contact info (telephone, email, physical address)
12. Organization information about the grant provider. Include the organization's name, about us, mission or focus, background information, types of grants if available.
13. 300 words summary of the grant which should be comprehensive and cover all important aspects of the grant. Keep this to the point and avoid fluff.

Include as much detail as possible in each field. Please be very sure that the grant is ACTIVE and accepting applications. If the grant is closed or not currently accepting applications do not include it.
Avoid making up information if not available on the page.

Here is the text from the page: {text}

Return ONLY valid JSON in this exact format:
{
    "grant_name": "string",
    "funding_priorities": "string",
    "types_of_grant": "string",
    "eligibility_criteria": "string",
    "eligible_applicants": ["string1", "string2"],
    "eligible_locations": "string",
    "grant_amount_range": "string",
    "grant_amount": "string",
    "proposal_deadline": "string",
    "recurrence": "string",
    "contact_info": {"email": "string", "phone": "string", "address": "string"},
    "organization_info": "string",
    "grant_summary": "string"
}"#;

pub const ORGANIZATION_SYSTEM: &str = "You are an expert researcher analyzing organization websites providing grants. Extract information about the organization from the provided web page text.";

/// One call over the text of every organization page.
pub const ORGANIZATION_EXTRACTION_PROMPT: &str = r#"Extract the following fields about the organization:

1. Organization Name - the official name of the organization/foundation
2. Mission - organization's mission statement, focus areas, funding priorities and interests. What kind of grants do they provide?
3. Background - historical background, when it was founded, key milestones
4. About - comprehensive about section describing what the organization does, their programs, initiatives
5. Contact Information:
   - Phone number(s)
   - Email address(es)
   - Physical address
   - Other contact info (social media, website forms, etc.)

Include as much detail as possible in each field. Be comprehensive and thorough.
Avoid making up information if not available on the pages.
If multiple pages contain similar information, consolidate and provide the most complete version.

Here is the combined text from all organization pages: {text}

Return ONLY valid JSON in this exact format:
{
    "org_name": "string",
    "mission": "string",
    "background": "string",
    "about": "string",
    "contact": {
        "phone": "string",
        "email": "string",
        "address": "string",
        "other_info": "json object with any other contact details or empty json if none"
    }
}"#;

/// Separator between page texts in the organization prompt.
pub const PAGE_SEPARATOR: &str = "\n\n--- NEW PAGE ---\n\n";

pub const DESCRIPTION_SYSTEM: &str = "You are an expert grant writer who creates clean, professional, and comprehensive grant opportunity descriptions for The Grant Portal - an online grant directory.";

/// Consolidated ~500-word opportunity description.
pub const DESCRIPTION_PROMPT: &str = r#"You have been provided with data from multiple grant opportunities from a foundation. Your task is to create ONE SINGLE consolidated 500-word professional opportunity description that synthesizes and combines all the ACTIVE grant information into a comprehensive funding opportunity description.

📝 FORMATTING REQUIREMENTS:
- Add appropriate icons (📊, 💰, 🎯, 📅, etc.) beside all section titles. Make them h3
- Use bullet points for lists when appropriate
- NO horizontal lines between text sections
- NO source URLs in the description
- Clean, readable formatting with proper spacing

📋 CONTENT REQUIREMENTS:
Create ONE description that includes:
1. 🏢 Organization Name
2. 📖 Background Information
3. 🎯 Mission / Purpose - organization focus, funding priorities and interests in 100 words
4. 🌍 Geographic Focus - All eligible locations
5. 🗂 Funding Areas & Interests
6. ✅ Eligibility Criteria - Identify if nonprofit organizations or small businesses or individuals are eligible for the grant
7. 💰 Funding Amounts / Grant Amounts - Complete range of grant amounts (show the full spectrum from all grants)
8. 📅 Proposal Deadlines / Grant Cycles - Include all relevant deadlines and cycles for grant proposals
9. 🔁 Grant Frequency / Reapplication Rules - Describe if grants are awarded annually or not.
10. 💡 Grant Programs & Awards - Bulleted list of short descriptions of each grant provided by the foundation along with the URLs in the format url: <grant_url> - No hyperlink. The format should be url: <grant_url> only
11. 📞 Contact Information - Include contact information with telephone number, email address and physical address.

Do not make up any information. Only use the data provided.

✅ CONSOLIDATION APPROACH:
- Merge similar information rather than repeating it
- Show the breadth of opportunities available
- Create a unified narrative that flows naturally
- Highlight the diverse range of funding available
- Make it clear this represents multiple funding opportunities
- Exactly 500 words (be precise)
- Professional, engaging tone that encourages applications
- If some information is missing or not specified, mention that to check on the foundation website
{org_context}

Multiple Grants Data:
{grants_data}

Write the single opportunity description now:"#;

const ORG_CONTEXT_TEMPLATE: &str = r#"
📋 ADDITIONAL ORGANIZATION CONTEXT (use to enhance the description):
Organization Name: {org_name}
Organization Mission: {mission}
Organization Background: {background}
About Organization: {about}
Organization Contact Info: {contact}

Use this organization information to provide better context and fill in any gaps in the grant data. If organization information conflicts with grant data, prioritize the grant data.
"#;

pub const METADATA_SYSTEM: &str = "You are an expert grant writer and SEO specialist. Generate 6 metadata fields for a grant opportunity based on the provided grant data.";

pub const METADATA_PROMPT: &str = r#"Remember to follow the word and character limits exactly. Ensure that the Opportunity Teaser is at least 500 words.

Generate the following 6 fields:

1. **Opportunity Title** (exactly 70 characters): Clean title for grant opportunity; make it vague; include grant intent, grant amount that describes who the grant helps and specific causes. Do not mention grant sources. SEO friendly.

2. **H1 Tag** (exactly 70 characters): Clean H1 tag for grant opportunity; make it vague; include grant intent, grant amount that describes who the grant helps and specific causes. Do not mention grant sources. SEO friendly.

3. **Meta Title** (exactly 70 characters): Clean Meta Title for grant opportunity; make it vague; include grant intent, grant amount that describes who the grant helps and specific causes. Do not mention grant sources. SEO friendly.

4. **Meta Description** (exactly 70 characters): Clean Meta Description that is DIFFERENT from the Meta Title for grant opportunity; make it vague; include grant intent, grant amount that describes who the grant helps and specific causes. Do not mention grant sources. SEO friendly.

5. **Opportunity Teaser** (approximately 500 words): Write a descriptive, engaging, comprehensive and easy to understand 500-word summary of the grant opportunity. Make the response vague. Do NOT show icons. Do NOT show bullets. Do not include any content source URLs. Provide information such as grants for which states or regions, grants for nonprofits or businesses or individuals. Describe the intended use of the funds. Show the dollar amount of the grant or grants. Write about the grant opportunity benefits, interests, identify if nonprofit organizations or small businesses or individuals are eligible and locations where available. Do not mention contact information or foundation name or grant name. Do not say it is a 'new grant' opportunity.

6. **Opportunity Title for Subscriber** (approximately 120 characters): Clean title for grant opportunity; includes the grant name, grant intent, grant amount that describes who the grant helps and specific causes. Do not mention grant source. SEO friendly.

Here is the grant data to use:

Grant Data: {grant_data}

Return ONLY valid JSON in this exact format:
{
    "opportunity_title": "string",
    "h1_tag": "string",
    "meta_title": "string",
    "meta_description": "string",
    "opportunity_teaser": "string",
    "opportunity_title_for_subscriber": "string"
}"#;

/// Domains that list foundations rather than being one.
pub const DIRECTORY_DOMAINS: &[&str] = &[
    "foundationcenter.org",
    "guidestar.org",
    "charitynavigator.org",
    "grantable.co",
    "grantmakers.io",
    "instrumentl.com",
    "grantadvisor.org",
    "intellispect.co",
    "taxexemptworld.com",
];

pub const URL_FINDER_SYSTEM: &str = r#"You are an expert foundation research assistant finding official foundation websites from web search results.
{foundation_info}
MISSION: Find the PRIMARY official website URL for the given organization.

ANALYSIS CRITERIA:
- Look for URLs that end with .org, .com, or similar domains
- Prioritize results that clearly match the foundation name
- Avoid directory listing websites like {directories}

VALIDATION REQUIREMENTS:
- Must be the organization's primary domain (not subdirectories)
- Prefer .org domains for foundations
- Avoid news articles, Wikipedia, or third-party sites

OUTPUT FORMAT: Return ONLY the URL, no explanations or additional text."#;

/// Substitute every `{key}` in `template` in one pass. Inserted values are
/// never rescanned, so page text that contains a placeholder stays literal.
fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        let hit = values.iter().find_map(|(key, value)| {
            after
                .strip_prefix(*key)
                .and_then(|r| r.strip_prefix('}'))
                .map(|remaining| (*value, remaining))
        });
        match hit {
            Some((value, remaining)) => {
                out.push_str(value);
                rest = remaining;
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}

pub fn format_grant_prompt(text: &str) -> String {
    GRANT_EXTRACTION_PROMPT.replace("{text}", text)
}

pub fn format_organization_prompt(page_texts: &[String]) -> String {
    ORGANIZATION_EXTRACTION_PROMPT.replace("{text}", &page_texts.join(PAGE_SEPARATOR))
}

/// Organization block for the description prompt. Empty without an org.
pub fn format_org_context(org: Option<&Organization>) -> String {
    let Some(org) = org else {
        return String::new();
    };
    let contact = serde_json::to_string_pretty(&org.contact).unwrap_or_default();
    fill_template(
        ORG_CONTEXT_TEMPLATE,
        &[
            ("org_name", org.org_name.as_str()),
            ("mission", org.mission.as_str()),
            ("background", org.background.as_str()),
            ("about", org.about.as_str()),
            ("contact", contact.as_str()),
        ],
    )
}

pub fn format_description_prompt(grants: &[Grant], org: Option<&Organization>) -> String {
    let grants_data = serde_json::to_string_pretty(grants).unwrap_or_else(|_| "[]".to_string());
    let org_context = format_org_context(org);
    fill_template(
        DESCRIPTION_PROMPT,
        &[("org_context", org_context.as_str()), ("grants_data", grants_data.as_str())],
    )
}

pub fn format_metadata_prompt(grant_data: &str) -> String {
    METADATA_PROMPT.replace("{grant_data}", grant_data)
}

/// System prompt for the finder, with optional `key: value` context lines.
pub fn format_url_finder_system(foundation_info: &[(String, String)]) -> String {
    let info = if foundation_info.is_empty() {
        String::new()
    } else {
        let mut block = String::from("\nFoundation Data:\n");
        for (key, value) in foundation_info {
            block.push_str(&format!("- {}: {}\n", key, value));
        }
        block
    };
    let directories = DIRECTORY_DOMAINS.join(", ");
    fill_template(
        URL_FINDER_SYSTEM,
        &[("foundation_info", info.as_str()), ("directories", directories.as_str())],
    )
}

/// User message for the finder: numbered search results.
pub fn format_url_finder_prompt(
    organization_name: &str,
    query: &str,
    results: &[(String, String)],
) -> String {
    let mut text = format!("Search query: {}\n\nSearch results:\n", query);
    for (idx, (url, content)) in results.iter().enumerate() {
        text.push_str(&format!("\n{}. URL: {}\n   Content: {}\n", idx + 1, url, content));
    }
    format!(
        "Organization: {}\n{}\n\nPlease analyze these results and return ONLY the best official URL for {}.",
        organization_name, text, organization_name
    )
}
