//! Story Context - 写作指令
//!
//! 每种讲述语言一对固定的 system / user 指令，篇幅区间随流程变化

use rand::seq::SliceRandom;
use rand::Rng;

use super::{StoryLength, StoryPrompt};
use crate::domain::voice::NarrationLanguage;

/// 故事主角
pub const PROTAGONIST: &str = "Liv";

/// 首页随机挑选的故事题目
pub const RANDOM_STORY_PROMPTS: [&str; 5] = [
    "A magical adventure where Liv discovers a secret garden",
    "Liv meets a friendly talking animal in the forest",
    "A bedtime story about Liv traveling to the moon",
    "Liv goes on a treasure hunt with her family",
    "A story about Liv learning to be brave",
];

/// 随机挑选一个故事题目
pub fn pick_random_prompt<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    RANDOM_STORY_PROMPTS
        .choose(rng)
        .copied()
        .unwrap_or(RANDOM_STORY_PROMPTS[0])
}

/// 发送给语言模型的指令对
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoryInstructions {
    pub system: String,
    pub user: String,
}

impl StoryInstructions {
    pub fn compose(language: NarrationLanguage, length: StoryLength, prompt: &StoryPrompt) -> Self {
        match language {
            NarrationLanguage::Punjabi => Self::punjabi(length, prompt.as_str()),
            NarrationLanguage::Default => Self::english(length, prompt.as_str()),
        }
    }

    fn english(length: StoryLength, prompt: &str) -> Self {
        let (low, high) = length.word_band();
        let length_rule = match length {
            StoryLength::Short => format!(
                "Keep stories between {}-{} words - very short and sweet.",
                low, high
            ),
            StoryLength::Long => format!("Keep stories between {}-{} words.", low, high),
        };
        let system = format!(
            "You are a creative children's story writer. Create engaging, age-appropriate stories \
             for a baby girl named {name}. The stories should be warm, imaginative, and suitable \
             for bedtime or playtime. {length_rule} Make {name} the main character and hero of the story.",
            name = PROTAGONIST,
            length_rule = length_rule,
        );
        let user = format!(
            "Create a story about: {}. Remember to make {} the main character.",
            prompt, PROTAGONIST
        );
        Self { system, user }
    }

    fn punjabi(length: StoryLength, prompt: &str) -> Self {
        let (low, high) = length.word_band();
        let length_rule = match length {
            StoryLength::Short => format!(
                "ਕਹਾਣੀਆਂ {}-{} ਸ਼ਬਦਾਂ ਦੇ ਵਿਚਕਾਰ ਰੱਖੋ - ਬਹੁਤ ਛੋਟੀਆਂ ਅਤੇ ਮਿੱਠੀਆਂ।",
                low, high
            ),
            StoryLength::Long => format!("ਕਹਾਣੀਆਂ {}-{} ਸ਼ਬਦਾਂ ਦੇ ਵਿਚਕਾਰ ਰੱਖੋ।", low, high),
        };
        let system = format!(
            "ਤੁਸੀਂ ਇੱਕ ਰਚਨਾਤਮਕ ਬੱਚਿਆਂ ਦੀ ਕਹਾਣੀ ਲੇਖਕ ਹੋ। ਲਿਵ ਨਾਮ ਦੀ ਇੱਕ ਛੋਟੀ ਕੁੜੀ ਲਈ ਦਿਲਚਸਪ, \
             ਉਮਰ ਦੇ ਅਨੁਕੂਲ ਕਹਾਣੀਆਂ ਬਣਾਓ। ਕਹਾਣੀਆਂ ਨਿੱਘੀਆਂ, ਕਲਪਨਾਤਮਕ, ਅਤੇ ਸੌਣ ਦੇ ਸਮੇਂ ਜਾਂ ਖੇਡਣ ਦੇ ਸਮੇਂ \
             ਲਈ ਢੁਕਵੀਆਂ ਹੋਣੀਆਂ ਚਾਹੀਦੀਆਂ ਹਨ। {} ਲਿਵ ਨੂੰ ਮੁੱਖ ਕਿਰਦਾਰ ਅਤੇ ਕਹਾਣੀ ਦੀ ਨਾਇਕਾ ਬਣਾਓ। \
             ਕਹਾਣੀ ਪੰਜਾਬੀ ਵਿੱਚ ਹੋਣੀ ਚਾਹੀਦੀ ਹੈ।",
            length_rule
        );
        let user = format!(
            "ਇਸ ਬਾਰੇ ਇੱਕ ਕਹਾਣੀ ਬਣਾਓ: {}. ਯਾਦ ਰੱਖੋ ਕਿ ਲਿਵ ਨੂੰ ਮੁੱਖ ਕਿਰਦਾਰ ਬਣਾਉਣਾ ਹੈ। ਕਹਾਣੀ ਪੰਜਾਬੀ ਵਿੱਚ ਲਿਖੋ।",
            prompt
        );
        Self { system, user }
    }
}
