use crate::domain::{AnalysisHints, AnalysisRequest, Metrics, PhonemeMap, Transcript};

pub const NONE_SUPPLIED: &str = "none supplied";

const TOPIC_NOT_ASSESSED: &str = "No expected topic was supplied, so topic relevance could not be \
assessed. Write exactly this under the heading: \"Topic relevance could not be assessed because no \
expected topic was provided.\" Do not invent a topic or a score.";

const ANALYSIS_TEMPLATE: &str = r#"# Comprehensive English Speech Analysis Protocol

Analyze the provided English speech transcript according to these precise guidelines to generate a standardized assessment report.

## Input Data

- **Speech Transcript:** "{transcript}"
- **Word Count:** {word_count}
- **Audio Duration:** {audio_duration}
- **Speaking Rate:** {speaking_rate}
- **Language Background:** {language_background}
- **Expected Topic:** {expected_topic}
- **Phonetic Data (CMU ARPAbet, "No phoneme found" marks unknown words):**
```json
{phoneme_data}
```

## Required Analysis Sections

### 1. CEFR Level Assessment

Provide a precise CEFR rating (A1-C2) for each category with supporting evidence:

| Category | Rating | Evidence |
|----------|--------|----------|
| Fluency | [CEFR Level] | [Specific evidence from transcript] |
| Grammar | [CEFR Level] | [Specific evidence from transcript] |
| Vocabulary | [CEFR Level] | [Specific evidence from transcript] |
| Pronunciation | [CEFR Level] | [Specific evidence from transcript] |
| Interaction | [CEFR Level] | [Specific evidence from transcript] |
| **Overall CEFR Level** | [CEFR Level] | [Summary justification] |

### 2. Quantitative Strengths & Weaknesses Analysis

**Strengths:**
- **Grammar Accuracy:** [X]% of sentences grammatically correct
- **Sentence Complexity:** [X]% complex sentences, [X]% compound sentences, [X]% simple sentences
- **Advanced Constructions:** [Exact number] of [specific constructions] used
- **Vocabulary Range:** [Specific metrics about vocabulary diversity]

**Areas for Improvement:**
- **Speaking Rate:** [Specific comparison to target range with percentage deviation]
- **Filler Usage:** [Exact count] of each filler word/phrase
- **Word Repetition:** [Specific words/phrases with exact repetition counts]
- **Linking Words:** [Analysis of connector usage with specific metrics]

### 3. Native-Like Rephrasing

Identify exactly 5 non-native-like constructions, quoted verbatim from the transcript, and provide native-like alternatives:

| Non-Native Construction | Native-Like Alternative | Improvement Explanation |
|-------------------------|-------------------------|-------------------------|
| [Direct quote from transcript] | [Improved version] | [Specific linguistic explanation] |
| [Direct quote from transcript] | [Improved version] | [Specific linguistic explanation] |
| [Direct quote from transcript] | [Improved version] | [Specific linguistic explanation] |
| [Direct quote from transcript] | [Improved version] | [Specific linguistic explanation] |
| [Direct quote from transcript] | [Improved version] | [Specific linguistic explanation] |

### 4. Vocabulary Metrics

**Quantitative Analysis:**
- **Total Word Count:** [Exact number]
- **Unique Word Count:** [Exact number]
- **Type-Token Ratio:** [Calculated ratio]
- **Lexical Density:** [Calculated percentage]
- **Academic Word List Coverage:** [Percentage of academic vocabulary]

**CEFR Level Distribution:**
- A1: [X]% ([number] words)
- A2: [X]% ([number] words)
- B1: [X]% ([number] words)
- B2: [X]% ([number] words)
- C1: [X]% ([number] words)
- C2: [X]% ([number] words)

### 5. Word Level Classification Table

Provide exactly 5 examples for each CEFR level:

| CEFR Level | Word/Phrase Examples |
|------------|----------------------|
| A1 | [5 specific examples from transcript] |
| A2 | [5 specific examples from transcript] |
| B1 | [5 specific examples from transcript] |
| B2 | [5 specific examples from transcript] |
| C1 | [5 specific examples from transcript] |
| C2 | [5 specific examples from transcript] |

### 6. Word Repetition Analysis

**High-Frequency Words/Phrases:**
- [Word/phrase]: [Exact count] occurrences
- [Word/phrase]: [Exact count] occurrences
- [Word/phrase]: [Exact count] occurrences
- [Word/phrase]: [Exact count] occurrences
- [Word/phrase]: [Exact count] occurrences

**Suggested Alternatives:**
- For [word/phrase]: [alternative 1], [alternative 2], [alternative 3]
- For [word/phrase]: [alternative 1], [alternative 2], [alternative 3]

### 7. Speaking Rate and Pause Analysis

**Rate Metrics:**
- **Words Per Minute:** [Exact number]
- **Syllables Per Minute:** [Estimated number]
- **Comparison to Native Range:** [Deviation percentage]

**Pause Analysis:**
- **Total Pauses:** [Exact number]
- **Natural Pauses:** [Exact number] ([X]%)
- **Hesitation Pauses:** [Exact number] ([X]%)
- **Pause Frequency:** 1 pause every [X] words
- **Average Pause Duration:** [Estimated duration]

**Fluency Assessment:**
- **Pause-to-Speech Ratio:** [Calculated ratio]
- **Flow Disruption Score:** [Quantitative measure]
- **Specific Disruption Patterns:** [List of patterns with examples]

### 8. Pronunciation Analysis

**Phoneme Accuracy:**
- **Vowels:** [X]% accuracy
- **Consonants:** [X]% accuracy
- **Consonant Clusters:** [X]% accuracy
- **Diphthongs:** [X]% accuracy

**Specific Issues:**
- [Phoneme]: [Description of issue] in words [example 1], [example 2]
- [Phoneme]: [Description of issue] in words [example 1], [example 2]

**Prosodic Features:**
- **Word Stress:** [Analysis with specific examples]
- **Sentence Stress:** [Analysis with specific examples]
- **Intonation Patterns:** [Analysis with specific examples]
- **Rhythm:** [Analysis with specific examples]

### 9. Mother Tongue Influence (MTI)

- **Identified First Language:** [Language] (confidence level: [high/medium/low])
- **Phonological Influences:** [Specific patterns with examples]
- **Syntactic Influences:** [Specific patterns with examples]
- **Lexical Influences:** [Specific patterns with examples]

### 10. Grammar Analysis

**Accuracy Statistics:**
- **Error-Free Clauses:** [X]%
- **Error-Free T-Units:** [X]%

**Grammar Strengths:**
- [Specific construction]: Used correctly [X] times
- [Specific construction]: Used correctly [X] times

**Grammar Errors:**
- [Error type]: [X] instances (e.g., [example from transcript])
- [Error type]: [X] instances (e.g., [example from transcript])

### 11. Improvement Plan

| Priority | Focus Area | Specific Exercise | Expected Outcome | Time Frame |
|----------|------------|-------------------|------------------|------------|
| 1 | [Area] | [Detailed exercise] | [Measurable outcome] | [Duration] |
| 2 | [Area] | [Detailed exercise] | [Measurable outcome] | [Duration] |
| 3 | [Area] | [Detailed exercise] | [Measurable outcome] | [Duration] |
| 4 | [Area] | [Detailed exercise] | [Measurable outcome] | [Duration] |
| 5 | [Area] | [Detailed exercise] | [Measurable outcome] | [Duration] |

### 12. Topic Relevance Analysis

{topic_relevance}

## Report Format Requirements

1. All sections must be completed with precise quantitative data where applicable
2. No subjective evaluations without supporting evidence
3. All examples must be direct quotes from the transcript
4. Tables must be properly formatted with aligned columns
5. Numerical data must include units of measurement where appropriate
6. Analysis must be evidence-based with specific references to the speech content
7. All improvement recommendations must be actionable and specific

Please format your response with clear sections and bullet points for each category.
"#;

/// Renders the fixed analysis template from one submission's data.
///
/// Every placeholder is always filled; absent optional inputs are rendered
/// as explicit "none supplied" / "not available" text.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportRequestBuilder;

impl ReportRequestBuilder {
    pub fn new() -> Self {
        Self
    }

    pub fn build(
        &self,
        transcript: &Transcript,
        phonemes: &PhonemeMap,
        metrics: &Metrics,
        hints: &AnalysisHints,
    ) -> AnalysisRequest {
        let word_count = metrics.word_count.to_string();
        let audio_duration = match metrics.audio_duration_seconds {
            Some(seconds) => format!("{:.2} seconds", seconds),
            None => "not available (no audio supplied)".to_string(),
        };
        let speaking_rate = match metrics.speaking_rate_wpm {
            Some(wpm) => format!("{} words per minute", wpm),
            None => "not available (no audio duration)".to_string(),
        };
        let language_background = match hints.language_hint() {
            Some(language) => format!("The speaker's likely native language is {}.", language),
            None => format!("{}. Infer the first language from the evidence.", NONE_SUPPLIED),
        };
        let expected_topic = hints.expected_topic().unwrap_or(NONE_SUPPLIED).to_string();
        let topic_relevance = match hints.expected_topic() {
            Some(topic) => topic_relevance_section(topic),
            None => TOPIC_NOT_ASSESSED.to_string(),
        };
        let phoneme_data = phonemes.to_pretty_json();

        let prompt = render(
            ANALYSIS_TEMPLATE,
            &[
                ("transcript", transcript.as_str()),
                ("word_count", &word_count),
                ("audio_duration", &audio_duration),
                ("speaking_rate", &speaking_rate),
                ("language_background", &language_background),
                ("expected_topic", &expected_topic),
                ("phoneme_data", &phoneme_data),
                ("topic_relevance", &topic_relevance),
            ],
        );

        AnalysisRequest::new(prompt)
    }
}

fn topic_relevance_section(topic: &str) -> String {
    format!(
        "- **Expected Topic:** {}\n\
         - **Relevance Score:** [0-10]\n\
         - **On-Topic Content:** [X]%\n\
         - **Off-Topic Content:** [X]%\n\
         - **Main Digressions:** [List with frequency]\n\
         - **Coherence Assessment:** [Analysis of logical flow]",
        topic
    )
}

/// Single-pass substitution of `{name}` placeholders.
///
/// Substituted values are never rescanned, so user text containing braces
/// cannot pull in other fields.
fn render(template: &str, values: &[(&str, &str)]) -> String {
    let mut output = String::with_capacity(template.len() * 2);
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        output.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        let replacement = after.find('}').and_then(|end| {
            let name = &after[..end];
            values
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| (*value, end))
        });

        match replacement {
            Some((value, end)) => {
                output.push_str(value);
                rest = &after[end + 1..];
            }
            None => {
                output.push('{');
                rest = after;
            }
        }
    }

    output.push_str(rest);
    output
}
