//! Story Query Handlers

use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::application::error::ApplicationError;
use crate::application::ports::{StoryRecord, StoryRepositoryPort, VoiceRepositoryPort};
use crate::application::queries::ListStories;

/// 音色已删除或从未关联时显示的讲述者
pub const UNKNOWN_NARRATOR: &str = "unknown narrator";

/// 故事列表项
#[derive(Debug, Clone)]
pub struct StoryResponse {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub voice_id: Option<Uuid>,
    pub narrator: String,
    pub audio_url: Option<String>,
    pub created_at: String,
}

impl StoryResponse {
    fn from_record(record: StoryRecord, narrator: String) -> Self {
        Self {
            id: record.id,
            title: record.title,
            content: record.content,
            voice_id: record.voice_id,
            narrator,
            audio_url: record.audio_url,
            created_at: record.created_at.to_rfc3339(),
        }
    }
}

/// ListStories Handler
pub struct ListStoriesHandler {
    story_repo: Arc<dyn StoryRepositoryPort>,
    voice_repo: Arc<dyn VoiceRepositoryPort>,
}

impl ListStoriesHandler {
    pub fn new(
        story_repo: Arc<dyn StoryRepositoryPort>,
        voice_repo: Arc<dyn VoiceRepositoryPort>,
    ) -> Self {
        Self {
            story_repo,
            voice_repo,
        }
    }

    pub async fn handle(&self, _query: ListStories) -> Result<Vec<StoryResponse>, ApplicationError> {
        let stories = self.story_repo.find_all().await?;
        let names: HashMap<Uuid, String> = self
            .voice_repo
            .find_all()
            .await?
            .into_iter()
            .map(|v| (v.id, v.name))
            .collect();

        Ok(stories
            .into_iter()
            .map(|story| {
                let narrator = story
                    .voice_id
                    .and_then(|id| names.get(&id).cloned())
                    .unwrap_or_else(|| UNKNOWN_NARRATOR.to_string());
                StoryResponse::from_record(story, narrator)
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::testing::{
        voice_record, InMemoryStoryRepository, InMemoryVoiceRepository,
    };
    use chrono::{Duration, Utc};

    fn story(voice_id: Option<Uuid>, age_secs: i64) -> StoryRecord {
        StoryRecord {
            id: Uuid::new_v4(),
            title: format!("story {}", age_secs),
            content: "Liv smiled.".to_string(),
            voice_id,
            audio_url: Some("http://blobs.test/storage/story-audio/story-1.mp3".to_string()),
            created_at: Utc::now() - Duration::seconds(age_secs),
        }
    }

    #[tokio::test]
    async fn test_list_stories_newest_first_with_narrator() {
        let voice = voice_record("nanu", Some("el-9"), None);
        let voices = Arc::new(InMemoryVoiceRepository::with(vec![voice.clone()]));
        let stories = Arc::new(InMemoryStoryRepository::default());
        stories.save(&story(Some(voice.id), 60)).await.unwrap();
        stories.save(&story(Some(Uuid::new_v4()), 10)).await.unwrap();
        stories.save(&story(None, 30)).await.unwrap();

        let listed = ListStoriesHandler::new(stories, voices)
            .handle(ListStories)
            .await
            .unwrap();

        let titles: Vec<_> = listed.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["story 10", "story 30", "story 60"]);
        assert_eq!(listed[0].narrator, UNKNOWN_NARRATOR);
        assert_eq!(listed[1].narrator, UNKNOWN_NARRATOR);
        assert_eq!(listed[2].narrator, "nanu");
    }
}
