//! Upload form state and its simulated upload lifecycle.
//!
//! The form moves `Idle -> FileSelected -> Uploading -> Complete -> Idle`. The
//! progress ticker and the completion delay are driven by two independent
//! timers in the component; both carry the generation they were started for so
//! a late callback from a finished or reset upload is ignored.
use crate::config::UploadConfig;
use crate::error::{Result, UploadError};

/// A playable URL derived from the selected file. Releasing the preview means
/// dropping the value.
pub trait PreviewSource {
    fn url(&self) -> &str;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecitationType {
    Tajweed,
    #[default]
    Tarteel,
    Tahqeeq,
}

impl RecitationType {
    pub const ALL: [RecitationType; 3] = [Self::Tajweed, Self::Tarteel, Self::Tahqeeq];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Tajweed => "tajweed",
            Self::Tarteel => "tarteel",
            Self::Tahqeeq => "tahqeeq",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Tajweed => "مجود 🌀",
            Self::Tarteel => "مرتل 📖",
            Self::Tahqeeq => "تحقيق 🔍",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackgroundType {
    #[default]
    None,
    Color,
    Image,
}

impl BackgroundType {
    pub const ALL: [BackgroundType; 3] = [Self::None, Self::Color, Self::Image];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Color => "color",
            Self::Image => "image",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::None => "بدون خلفية",
            Self::Color => "لون ثابت",
            Self::Image => "صورة إسلامية",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == value)
    }
}

/// What the browser tells us about a picked file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileMeta {
    pub name: String,
    pub size: u64,
    pub mime: String,
}

#[derive(Debug)]
pub struct SelectedFile<P> {
    pub meta: FileMeta,
    preview: Option<P>,
}

impl<P: PreviewSource> SelectedFile<P> {
    pub fn preview_url(&self) -> Option<&str> {
        self.preview.as_ref().map(PreviewSource::url)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadPhase {
    Idle,
    FileSelected,
    Uploading { generation: u64 },
    Complete { generation: u64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Keep ticking.
    Advanced,
    /// Progress hit 100; the ticker can stop.
    Finished,
    /// The upload this ticker belonged to is over.
    Stale,
}

/// Refuse files the form does not accept. Type is checked before size.
pub fn validate_file(meta: &FileMeta, config: &UploadConfig) -> Result<()> {
    if !config.accepts_mime(&meta.mime) {
        return Err(UploadError::InvalidFileType {
            mime: meta.mime.clone(),
        });
    }
    if meta.size > config.max_file_size_bytes {
        return Err(UploadError::FileTooLarge {
            size: meta.size,
            limit: config.max_file_size_bytes,
        });
    }
    Ok(())
}

#[derive(Debug)]
pub struct UploadForm<P> {
    file: Option<SelectedFile<P>>,
    pub title: String,
    pub description: String,
    pub reciter: String,
    pub recitation_type: RecitationType,
    pub tags: Vec<String>,
    pub enable_repeat: bool,
    pub show_tafseer: bool,
    pub background: BackgroundType,
    phase: UploadPhase,
    progress: u8,
    generation: u64,
}

impl<P> Default for UploadForm<P> {
    fn default() -> Self {
        Self {
            file: None,
            title: String::new(),
            description: String::new(),
            reciter: String::new(),
            recitation_type: RecitationType::default(),
            tags: Vec::new(),
            enable_repeat: false,
            show_tafseer: false,
            background: BackgroundType::default(),
            phase: UploadPhase::Idle,
            progress: 0,
            generation: 0,
        }
    }
}

impl<P: PreviewSource> UploadForm<P> {
    pub fn file(&self) -> Option<&SelectedFile<P>> {
        self.file.as_ref()
    }

    pub fn preview_url(&self) -> Option<&str> {
        self.file.as_ref().and_then(SelectedFile::preview_url)
    }

    pub fn phase(&self) -> UploadPhase {
        self.phase
    }

    pub fn progress(&self) -> u8 {
        self.progress
    }

    pub fn is_uploading(&self) -> bool {
        matches!(self.phase, UploadPhase::Uploading { .. })
    }

    pub fn is_complete(&self) -> bool {
        matches!(self.phase, UploadPhase::Complete { .. })
    }

    /// A new file may only be picked before an upload starts.
    pub fn accepts_file_changes(&self) -> bool {
        matches!(self.phase, UploadPhase::Idle | UploadPhase::FileSelected)
    }

    pub fn is_submittable(&self) -> bool {
        self.file.is_some() && !self.title.trim().is_empty() && !self.reciter.trim().is_empty()
    }

    /// Validate and adopt a picked file. `make_preview` is only called for an
    /// accepted file; the previous preview is released when it is replaced.
    /// Rejected files and picks during an upload leave the form unchanged.
    pub fn select_file<F>(
        &mut self,
        meta: FileMeta,
        make_preview: F,
        config: &UploadConfig,
    ) -> Result<()>
    where
        F: FnOnce() -> Option<P>,
    {
        validate_file(&meta, config)?;
        if !self.accepts_file_changes() {
            tracing::warn!(name = %meta.name, "ignoring file pick while an upload is in flight");
            return Ok(());
        }
        tracing::info!(name = %meta.name, size = meta.size, "recitation file accepted");
        self.file = Some(SelectedFile {
            meta,
            preview: make_preview(),
        });
        self.phase = UploadPhase::FileSelected;
        Ok(())
    }

    /// Drop the selected file and its preview. Other fields are kept.
    pub fn clear_file(&mut self) -> bool {
        if !self.accepts_file_changes() || self.file.is_none() {
            return false;
        }
        self.file = None;
        self.phase = UploadPhase::Idle;
        true
    }

    /// Whether submitting now would start an upload. False while uploading and
    /// during the pause between completion and reset.
    pub fn can_begin_upload(&self) -> bool {
        self.phase == UploadPhase::FileSelected && self.is_submittable()
    }

    /// Start a simulated upload. Returns the generation both timers must carry.
    pub fn begin_upload(&mut self) -> Option<u64> {
        if !self.can_begin_upload() {
            return None;
        }
        self.generation += 1;
        self.progress = 0;
        self.phase = UploadPhase::Uploading {
            generation: self.generation,
        };
        Some(self.generation)
    }

    pub fn tick_progress(&mut self, generation: u64, step: u8) -> TickOutcome {
        if self.phase != (UploadPhase::Uploading { generation }) {
            return TickOutcome::Stale;
        }
        if self.progress >= 100 {
            return TickOutcome::Finished;
        }
        self.progress = self.progress.saturating_add(step).min(100);
        if self.progress >= 100 {
            TickOutcome::Finished
        } else {
            TickOutcome::Advanced
        }
    }

    /// The simulated transfer delay elapsed. Progress is forced to 100.
    pub fn complete_upload(&mut self, generation: u64) -> bool {
        if self.phase != (UploadPhase::Uploading { generation }) {
            return false;
        }
        self.progress = 100;
        self.phase = UploadPhase::Complete { generation };
        true
    }

    /// Return every field to its initial value after a completed upload.
    pub fn reset_after(&mut self, generation: u64) -> bool {
        if self.phase != (UploadPhase::Complete { generation }) {
            return false;
        }
        let next_generation = self.generation;
        *self = Self::default();
        self.generation = next_generation;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[derive(Debug)]
    struct TrackedUrl {
        url: String,
        released: Rc<Cell<usize>>,
    }

    impl PreviewSource for TrackedUrl {
        fn url(&self) -> &str {
            &self.url
        }
    }

    impl Drop for TrackedUrl {
        fn drop(&mut self) {
            self.released.set(self.released.get() + 1);
        }
    }

    fn mp3(name: &str, size: u64) -> FileMeta {
        FileMeta {
            name: name.to_string(),
            size,
            mime: "audio/mpeg".to_string(),
        }
    }

    fn preview(url: &str, released: &Rc<Cell<usize>>) -> impl FnOnce() -> Option<TrackedUrl> {
        let url = url.to_string();
        let released = released.clone();
        move || Some(TrackedUrl { url, released })
    }

    fn ready_form(released: &Rc<Cell<usize>>) -> UploadForm<TrackedUrl> {
        let config = UploadConfig::default();
        let mut form = UploadForm::default();
        form.select_file(mp3("fatiha.mp3", 1024 * 1024), preview("blob:1", released), &config)
            .expect("valid file");
        form.title = "Test".to_string();
        form.reciter = "Ahmad".to_string();
        form
    }

    #[test]
    fn oversized_mp3_is_rejected_without_touching_state() {
        let config = UploadConfig::default();
        let mut form: UploadForm<TrackedUrl> = UploadForm::default();
        form.title = "kept".to_string();
        let created = Cell::new(false);
        let result = form.select_file(
            mp3("long.mp3", 25 * 1024 * 1024),
            || {
                created.set(true);
                None
            },
            &config,
        );
        assert!(matches!(result, Err(UploadError::FileTooLarge { .. })));
        assert!(!created.get());
        assert!(form.file().is_none());
        assert_eq!(form.phase(), UploadPhase::Idle);
        assert_eq!(form.title, "kept");
    }

    #[test]
    fn plain_text_is_rejected_as_wrong_type() {
        let config = UploadConfig::default();
        let meta = FileMeta {
            name: "notes.txt".to_string(),
            size: 1024 * 1024,
            mime: "text/plain".to_string(),
        };
        assert!(matches!(
            validate_file(&meta, &config),
            Err(UploadError::InvalidFileType { .. })
        ));
    }

    #[test]
    fn type_is_checked_before_size() {
        let config = UploadConfig::default();
        let meta = FileMeta {
            name: "huge.wav".to_string(),
            size: 100 * 1024 * 1024,
            mime: "audio/wav".to_string(),
        };
        assert!(matches!(
            validate_file(&meta, &config),
            Err(UploadError::InvalidFileType { .. })
        ));
    }

    #[test]
    fn size_ceiling_is_inclusive() {
        let config = UploadConfig::default();
        let meta = mp3("edge.mp3", config.max_file_size_bytes);
        assert!(validate_file(&meta, &config).is_ok());
    }

    #[test]
    fn submit_requires_file_title_and_reciter() {
        let released = Rc::new(Cell::new(0));
        let mut form = ready_form(&released);
        assert!(form.is_submittable());
        form.reciter = "  ".to_string();
        assert!(!form.is_submittable());
        form.reciter = "Ahmad".to_string();
        form.clear_file();
        assert!(!form.is_submittable());
        assert_eq!(form.begin_upload(), None);
    }

    #[test]
    fn replacing_file_releases_previous_preview() {
        let config = UploadConfig::default();
        let released = Rc::new(Cell::new(0));
        let mut form = ready_form(&released);
        form.select_file(mp3("baqara.mp3", 2048), preview("blob:2", &released), &config)
            .expect("valid file");
        assert_eq!(released.get(), 1);
        assert_eq!(form.preview_url(), Some("blob:2"));
    }

    #[test]
    fn clearing_file_releases_preview_and_keeps_fields() {
        let released = Rc::new(Cell::new(0));
        let mut form = ready_form(&released);
        form.tags = vec!["khushu".to_string()];
        assert!(form.clear_file());
        assert_eq!(released.get(), 1);
        assert_eq!(form.phase(), UploadPhase::Idle);
        assert_eq!(form.title, "Test");
        assert_eq!(form.tags, vec!["khushu".to_string()]);
        assert!(!form.clear_file());
    }

    #[test]
    fn full_cycle_returns_to_initial_state() {
        let released = Rc::new(Cell::new(0));
        let mut form = ready_form(&released);
        form.description = "desc".to_string();
        form.recitation_type = RecitationType::Tajweed;
        form.background = BackgroundType::Image;
        form.enable_repeat = true;
        form.show_tafseer = true;
        form.tags = vec!["a".to_string(), "b".to_string()];

        let generation = form.begin_upload().expect("submittable");
        assert!(form.is_uploading());
        assert!(!form.clear_file());

        assert_eq!(form.tick_progress(generation, 5), TickOutcome::Advanced);
        assert_eq!(form.progress(), 5);

        assert!(form.complete_upload(generation));
        assert!(form.is_complete());
        assert_eq!(form.progress(), 100);
        assert_eq!(released.get(), 0);

        assert!(form.reset_after(generation));
        assert_eq!(released.get(), 1);
        assert!(form.file().is_none());
        assert_eq!(form.phase(), UploadPhase::Idle);
        assert_eq!(form.progress(), 0);
        assert!(form.title.is_empty());
        assert!(form.description.is_empty());
        assert!(form.reciter.is_empty());
        assert_eq!(form.recitation_type, RecitationType::Tarteel);
        assert_eq!(form.background, BackgroundType::None);
        assert!(!form.enable_repeat);
        assert!(!form.show_tafseer);
        assert!(form.tags.is_empty());
    }

    #[test]
    fn submit_stays_closed_until_reset() {
        let released = Rc::new(Cell::new(0));
        let mut form = ready_form(&released);
        assert!(form.can_begin_upload());

        let generation = form.begin_upload().expect("submittable");
        assert!(!form.can_begin_upload());

        assert!(form.complete_upload(generation));
        assert!(form.is_submittable());
        assert!(!form.can_begin_upload());
        assert_eq!(form.begin_upload(), None);
        assert!(form.is_complete());

        assert!(form.reset_after(generation));
        assert!(!form.can_begin_upload());
    }

    #[test]
    fn progress_may_reach_hundred_before_completion() {
        let released = Rc::new(Cell::new(0));
        let mut form = ready_form(&released);
        let generation = form.begin_upload().expect("submittable");
        let mut outcome = TickOutcome::Advanced;
        for _ in 0..20 {
            outcome = form.tick_progress(generation, 5);
        }
        assert_eq!(outcome, TickOutcome::Finished);
        assert_eq!(form.progress(), 100);
        assert!(form.is_uploading());
        assert_eq!(form.tick_progress(generation, 5), TickOutcome::Finished);
        assert!(form.complete_upload(generation));
    }

    #[test]
    fn ticks_after_completion_are_stale() {
        let released = Rc::new(Cell::new(0));
        let mut form = ready_form(&released);
        let generation = form.begin_upload().expect("submittable");
        form.tick_progress(generation, 5);
        assert!(form.complete_upload(generation));
        assert_eq!(form.tick_progress(generation, 5), TickOutcome::Stale);
        assert_eq!(form.progress(), 100);
    }

    #[test]
    fn progress_is_clamped_at_hundred() {
        let released = Rc::new(Cell::new(0));
        let mut form = ready_form(&released);
        let generation = form.begin_upload().expect("submittable");
        for _ in 0..3 {
            form.tick_progress(generation, 40);
        }
        assert_eq!(form.progress(), 100);
    }

    #[test]
    fn stale_generation_cannot_reset_new_upload() {
        let config = UploadConfig::default();
        let released = Rc::new(Cell::new(0));
        let mut form = ready_form(&released);
        let first = form.begin_upload().expect("submittable");
        form.complete_upload(first);
        form.reset_after(first);

        form.select_file(mp3("second.mp3", 10), preview("blob:3", &released), &config)
            .expect("valid file");
        form.title = "Again".to_string();
        form.reciter = "Ahmad".to_string();
        let second = form.begin_upload().expect("submittable");
        assert_ne!(first, second);
        assert!(!form.complete_upload(first));
        assert!(!form.reset_after(first));
        assert_eq!(form.tick_progress(first, 5), TickOutcome::Stale);
        assert!(form.is_uploading());
    }

    #[test]
    fn file_picks_are_ignored_during_upload() {
        let config = UploadConfig::default();
        let released = Rc::new(Cell::new(0));
        let mut form = ready_form(&released);
        form.begin_upload().expect("submittable");
        form.select_file(mp3("other.mp3", 10), preview("blob:9", &released), &config)
            .expect("valid file");
        assert_eq!(form.preview_url(), Some("blob:1"));
        assert_eq!(released.get(), 0);
    }

    #[test]
    fn enum_values_round_trip_through_strings() {
        for kind in RecitationType::ALL {
            assert_eq!(RecitationType::parse(kind.as_str()), Some(kind));
        }
        for kind in BackgroundType::ALL {
            assert_eq!(BackgroundType::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(RecitationType::parse("murattal"), None);
    }
}
