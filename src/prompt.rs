//! Prompt template for the security review.

const PROMPT_HEAD: &str = "Analyze this neural network code for security vulnerabilities and provide a brief report.

Focus on:
1. Hardcoded input shapes
2. Missing regularization (Dropout, BatchNorm)
3. Adversarial susceptibility
4. Parameter efficiency issues

Code:
```python
";

const PROMPT_TAIL: &str = "
```

Provide:
- Security score (0-100)
- List of vulnerabilities found
- Recommendations

Keep it concise.";

/// Embed the source verbatim in the review template.
pub fn build_prompt(source: &str) -> String {
    let mut prompt = String::with_capacity(PROMPT_HEAD.len() + source.len() + PROMPT_TAIL.len());
    prompt.push_str(PROMPT_HEAD);
    prompt.push_str(source);
    prompt.push_str(PROMPT_TAIL);
    prompt
}
