/// Removes every `<think>…</think>` block; an unclosed block swallows the rest.
fn strip_reasoning(input: &str) -> String {
    let mut cleaned = input.to_string();

    while let Some(start) = cleaned.find("<think>") {
        match cleaned[start..].find("</think>") {
            Some(offset) => {
                let end = start + offset + "</think>".len();
                cleaned.replace_range(start..end, "");
            }
            None => {
                cleaned.truncate(start);
                break;
            }
        }
    }

    cleaned
}

/// Returns the first balanced JSON object in a model reply.
///
/// Braces inside string literals are ignored, so question text such as
/// `"print({})"` does not end the object early.
pub(crate) fn extract_json_object(input: &str) -> Option<String> {
    let cleaned = strip_reasoning(input);
    let start = cleaned.find('{')?;

    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (idx, ch) in cleaned[start..].char_indices() {
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    let end = start + idx;
                    return Some(cleaned[start..=end].to_string());
                }
            }
            _ => {}
        }
    }

    None
}
