/// Maximum number of characters of document text embedded in a prompt
pub const MAX_PROMPT_CHARS: usize = 35_000;

/// First `max_chars` characters of `text`, never splitting a character
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

/// Build the analysis prompt for a document's extracted text
pub fn build_prompt(text: &str) -> String {
    let excerpt = truncate_chars(text, MAX_PROMPT_CHARS);

    format!(
        "You are a Senior Financial Analyst. Analyze this earnings call transcript or financial document in detail.\n\
\n\
Your goal is to extract specific, actionable insights, not generic summaries.\n\
Focus on numbers, specific project names, and direct causes/effects.\n\
\n\
Input Text: {excerpt}\n\
\n\
Return a valid JSON object with the following fields:\n\
\n\
1. \"management_tone\": A short phrase (e.g., \"Highly Confident\", \"Cautious\").\n\
2. \"tone_evidence\": A detailed sentence explaining WHY, citing specific quotes or metrics mentioned.\n\
3. \"key_concerns\": A list of 3-5 specific risks. Do not just say \"Supply Chain\". Say \"Supply chain disruptions in the Red Sea impacting Q3 deliveries\".\n\
4. \"key_positives\": A list of 3-5 specific wins. Include numbers (e.g., \"Revenue grew 20% to $5B\" instead of just \"Revenue grew\").\n\
5. \"guidance\": A dictionary or list of forward-looking targets (Revenue, Margins, Capex, Volume) with specific numbers/dates.\n\
6. \"confidence_score\": Your confidence in this analysis (High/Medium/Low).\n\
\n\
IMPORTANT: Return ONLY raw JSON. No Markdown formatting (```json).\n"
    )
}
