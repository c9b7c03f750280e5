/// Strip markdown code fences and surrounding whitespace from model output
///
/// Every "```json" marker is removed first, then every remaining "```".
/// The remaining text is not inspected further.
pub fn clean_completion(raw: &str) -> String {
    raw.replace("```json", "").replace("```", "").trim().to_string()
}
