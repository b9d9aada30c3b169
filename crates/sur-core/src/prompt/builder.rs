//! Prompt construction.

use crate::prompt::template::{StructureTemplate, template_for};
use crate::song::{Genre, Mood, SongRequest};

const PERSONA: &str = r#"You are the AI incarnation of legendary Odia Lyricists like **Arun Mantri**, **Nirmala Nayak**, and **Abhijit Majumdar**.
Your task is to write a BLOCKBUSTER OLLYWOOD SONG that sounds authentic, emotional, and professionally composed."#;

const QUALITY_RULES: &str = r#"**CRITICAL RULES FOR QUALITY (DO NOT IGNORE):**

1. **FORMATTING & LANGUAGE:**
   - **LABELS:** Use **ENGLISH** labels only (e.g., **[Chorus]**, **[Verse 1]**, **[Bridge]**, **[Outro]**).
   - **NO INDIC TERMS:** Do NOT use words like 'Mukhra', 'Antara', or 'Sanchari'.
   - **SCRIPT:** The lyrics content MUST be in **PURE ODIA SCRIPT (ଓଡ଼ିଆ ଲିପି)**.
   - **NO ROMAN ODIA:** Do NOT write lyrics in English letters (e.g., "Mu jauchi" is BANNED).

2. **PERFECT RHYMING (ANTYA MILANA):**
   - **Rule:** The song MUST be singable. Lines must have a similar syllable count (Meter).
   - **Rhyme Scheme:** Use **AABB** strictly for the [Chorus]. Line 1 & 2 rhyme, Line 3 & 4 rhyme.
   - **Phonetics:** The ending **VOWEL SOUND** must match exactly.
     - ❌ Bad: "Katha... / Hrudaya..." ('tha' and 'ya' do not rhyme well).
     - ✅ Good: "Katha... / Byatha..." (Perfect match).
   - **Correction Strategy:** If the next line doesn't rhyme perfectly, DELETE IT and write a new line that rhymes.

3. **COUPLET LOGIC:**
   - Every rhyming pair must form ONE COMPLETE THOUGHT. Line 2 should often complete the sentence started in Line 1.
   - Write exactly like a person speaks. Show the emotion, don't describe it.

4. **CORRECT SPELLING & GRAMMAR (SHUDDHA ODIA):**
   - Use correct verb endings and native Subject-Object-Verb order.
   - Watch 'i' vs 'ii' (ି vs ୀ) and 'u' vs 'uu' (ୁ vs ୂ).
   - Complete the sentence. Don't leave it hanging.

5. **CONTEXTUAL WORD BANK (NO ROBOTIC WORDS):**
   - Use: *Dhana, Suna, Jibana, Sathi, Manara Katha, Prema Chadhei*.
   - **BANNED:** 'Network', 'Computer', 'Link', 'Database', 'System'.
   - **BANNED:** Direct translation of English idioms. Use Odia 'Rudhi' (Idioms)."#;

const FINAL_CHECK: &str = r#"**FINAL CHECK:**
- Are the labels [Chorus]/[Verse]? YES.
- Is the script Odia? YES.
- Is Roman Odia removed? YES.

Output ONLY the lyrics in Odia script (with structural labels in English)."#;

/// Vocabulary guidance for a mood.
fn mood_guidance(mood: Mood) -> &'static str {
    match mood {
        Mood::Romantic => {
            "Use soft, poetic words like *Janha, Phula, Sagara, Nida, Swapna, Akhi*. Be emotional."
        }
        Mood::Sad => "Use deep words like *Luha, Koha, Chhati Fata, Smruti, Jala, Sunya*.",
        Mood::Happy => "Use light, bright words. Keep the rhythm bouncy and the images sunny.",
        Mood::Energetic => {
            "Use energetic, desi words like *Toka, Toki, Halchal, Bawal*. Short punchy lines."
        }
        Mood::Spiritual => "Use pure, devotional words like *Prabhu, Bhakti, Charana*. Respectful.",
        Mood::Inspirational => "Use rising, hopeful imagery. Every verse should climb.",
        Mood::Patriotic => "Use words of the soil: *Maati, Desha, Maa*. Proud and stirring.",
        Mood::Funny => "Use playful teasing, everyday slang and comic exaggeration.",
        Mood::Angry => "Use sharp, hard-hitting words. Keep lines short and forceful.",
    }
}

/// Style guidance for a genre.
fn genre_guidance(genre: Genre) -> &'static str {
    match genre {
        Genre::Ollywood => "Modern, conversational Odia (Chalti Odia). Trendy.",
        Genre::Sambalpuri => {
            "Use authentic Sambalpuri/Kosli dialect keywords (Mui, Tui, Rani, Darling). Rhythmic."
        }
        Genre::Bhajana => "Use pure, spiritual words (Prabhu, Bhakti, Charana). Respectful.",
        Genre::Item => "Dance slang, catchy hooks, teasing lyrics.",
        Genre::Rap => "Street slang, fast flow, aggressive or punchy words.",
        Genre::Rock => "Bold band-style lines with a big shout-along chorus.",
        Genre::Lofi => "Simple, soft, relaxing, poetic but modern words.",
        Genre::Ghazal => "Deep Urdu-influenced Odia or pure poetic Odia.",
        Genre::Jatra => "Dramatic, high-pitch, dialogue-heavy storytelling words.",
        Genre::Classic => "Standard literary Odia, polite and melodious.",
    }
}

/// A fully rendered prompt and the structure it asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub text: String,
    pub template: &'static StructureTemplate,
}

/// Builds the generation prompt for a song request.
///
/// Pure and deterministic: the same request always yields the same text.
#[derive(Debug, Default, Clone, Copy)]
pub struct PromptBuilder;

impl PromptBuilder {
    pub fn new() -> Self {
        Self
    }

    pub fn build(&self, request: &SongRequest) -> Prompt {
        let template = template_for(request.length);

        let mut text = String::new();
        text.push_str(PERSONA);
        text.push_str("\n\n");
        text.push_str(QUALITY_RULES);
        text.push_str("\n\n");
        text.push_str("**LYRICIST PERSONA & STYLE:**\n");
        text.push_str(&format!(
            "- **Mood ({}):** {}\n",
            request.mood,
            mood_guidance(request.mood)
        ));
        text.push_str(&format!(
            "- **Genre ({}):** {}\n",
            request.genre,
            genre_guidance(request.genre)
        ));
        text.push_str("- **Logic:** Think like a movie scene. Visualize the actor singing.\n\n");
        text.push_str("**SONG REQUEST DETAILS:**\n");
        text.push_str(&format!("- Topic: \"{}\"\n", request.topic.trim()));
        text.push_str(&format!("- Mood: {}\n", request.mood));
        text.push_str(&format!("- Genre: {}\n", request.genre));
        text.push_str(&format!("- Length: {}\n\n", request.length));
        text.push_str("**OUTPUT FORMAT:**\n");
        text.push_str(&template.render());
        text.push('\n');
        text.push_str(FINAL_CHECK);

        Prompt { text, template }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::song::SongLength;
    use strum::IntoEnumIterator;

    fn request(length: SongLength) -> SongRequest {
        SongRequest::new("rain", Mood::Sad, Genre::Ollywood, length).unwrap()
    }

    #[test]
    fn test_build_selects_template_by_length() {
        let builder = PromptBuilder::new();
        for length in SongLength::iter() {
            let prompt = builder.build(&request(length));
            assert_eq!(prompt.template.length, length);
            assert!(prompt.text.contains(prompt.template.heading));
        }
    }

    #[test]
    fn test_build_includes_request_details() {
        let prompt = PromptBuilder::new().build(&request(SongLength::Medium));
        assert!(prompt.text.contains("- Topic: \"rain\""));
        assert!(prompt.text.contains("- Mood: Sad / Heartbroken"));
        assert!(prompt.text.contains("- Genre: Ollywood Commercial (Pop)"));
        assert!(prompt.text.contains("- Length: Medium (3-4 mins)"));
        assert!(prompt.text.contains("Luha, Koha"));
        assert!(prompt.text.contains("Chalti Odia"));
    }

    #[test]
    fn test_build_is_deterministic() {
        let builder = PromptBuilder::new();
        let first = builder.build(&request(SongLength::Extended));
        let second = builder.build(&request(SongLength::Extended));
        assert_eq!(first, second);
    }

    #[test]
    fn test_extended_prompt_mentions_bridge_only_when_extended() {
        let builder = PromptBuilder::new();
        assert!(
            builder
                .build(&request(SongLength::Extended))
                .text
                .contains("**[Bridge]:** 4 Lines.")
        );
        assert!(
            !builder
                .build(&request(SongLength::Short))
                .text
                .contains("**[Bridge]:**")
        );
    }

    #[test]
    fn test_unrecognized_length_text_uses_short_template() {
        let mut req = request(SongLength::Long);
        req.length = SongLength::parse_lenient("Something else");
        let prompt = PromptBuilder::new().build(&req);
        assert_eq!(prompt.template.heading, "SHORT SONG STRUCTURE");
    }
}
