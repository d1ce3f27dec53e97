//! User-facing message catalogue
//!
//! Every line imgai prints for a human goes through [`Translator::render`].
//! The language is chosen once at start-up (`--lang`, then `IMGAI_LANG`,
//! then English) and passed by value to whoever prints.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::processing::formats::ImageFormat;

/// Environment variable consulted when `--lang` is not given
pub const LANG_ENV: &str = "IMGAI_LANG";

/// Supported message languages
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Language {
    #[default]
    En,
    Ja,
}

impl Language {
    pub fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Ja => "ja",
        }
    }

    /// Resolve from an explicit choice, falling back to `IMGAI_LANG`
    pub fn resolve(explicit: Option<&str>) -> Self {
        explicit
            .map(str::to_string)
            .or_else(|| std::env::var(LANG_ENV).ok())
            .map(|code| code.parse().unwrap_or_default())
            .unwrap_or_default()
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_lowercase();
        // Accept locale-style values such as ja_JP.UTF-8
        match code.split(|c| c == '_' || c == '-' || c == '.').next() {
            Some("en") => Ok(Self::En),
            Some("ja") => Ok(Self::Ja),
            _ => Err(format!("unknown language: {}", s)),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Everything imgai can say to the user
#[derive(Debug, Clone, Copy)]
pub enum Message<'a> {
    DryRunHeader,
    WouldProcess { count: usize },
    RunWithoutDryRun,
    SuccessfullyProcessed { succeeded: usize, total: usize },
    Failed { path: &'a Path, error: &'a str },
    WouldResize { input: &'a Path, output: &'a Path, width: u32, height: u32 },
    Resized { input: &'a Path, output: &'a Path, width: u32, height: u32 },
    DimensionRequired,
    WouldConvert { input: &'a Path, output: &'a Path, format: ImageFormat, quality: Option<u8> },
    Converted { input: &'a Path, output: &'a Path, format: ImageFormat },
    QualityRange,
    ExifDataFor { path: &'a Path },
    NoExif,
    WouldStrip { input: &'a Path, output: &'a Path },
    Stripped { output: &'a Path },
}

/// Renders [`Message`]s in one language
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Translator {
    language: Language,
}

impl Translator {
    pub fn new(language: Language) -> Self {
        Self { language }
    }

    pub fn language(self) -> Language {
        self.language
    }

    pub fn render(self, message: Message<'_>) -> String {
        match self.language {
            Language::En => english(message),
            Language::Ja => japanese(message),
        }
    }
}

fn quality_suffix(quality: Option<u8>) -> String {
    quality.map(|q| format!(", quality={}", q)).unwrap_or_default()
}

fn english(message: Message<'_>) -> String {
    use Message::*;
    match message {
        DryRunHeader => "🔍 DRY RUN MODE - No files will be modified".to_string(),
        WouldProcess { count } => format!("✓ Would process {} images", count),
        RunWithoutDryRun => "💡 Run without --dry-run to execute".to_string(),
        SuccessfullyProcessed { succeeded, total } => {
            format!("✓ Successfully processed {}/{} images", succeeded, total)
        }
        Failed { path, error } => format!("✗ Failed: {} - {}", path.display(), error),
        WouldResize { input, output, width, height } => format!(
            "Would resize: {} → {} ({}x{})",
            input.display(), output.display(), width, height
        ),
        Resized { input, output, width, height } => format!(
            "✓ Resized: {} → {} ({}x{})",
            input.display(), output.display(), width, height
        ),
        DimensionRequired => {
            "at least one dimension (width or height) must be specified".to_string()
        }
        WouldConvert { input, output, format, quality } => format!(
            "Would convert: {} → {} ({}{})",
            input.display(), output.display(), format, quality_suffix(quality)
        ),
        Converted { input, output, format } => format!(
            "✓ Converted: {} → {} ({})",
            input.display(), output.display(), format.label()
        ),
        QualityRange => "quality must be between 1 and 100".to_string(),
        ExifDataFor { path } => format!("EXIF Data for: {}", path.display()),
        NoExif => "No EXIF data found in this image.".to_string(),
        WouldStrip { input, output } => format!(
            "Would strip metadata: {} → {}",
            input.display(), output.display()
        ),
        Stripped { output } => format!("✓ Stripped metadata: {}", output.display()),
    }
}

fn japanese(message: Message<'_>) -> String {
    use Message::*;
    match message {
        DryRunHeader => "🔍 ドライランモード - ファイルは変更されません".to_string(),
        WouldProcess { count } => format!("✓ {}個の画像を処理する予定です", count),
        RunWithoutDryRun => "💡 --dry-run なしで実行すると処理が実行されます".to_string(),
        SuccessfullyProcessed { succeeded, total } => {
            format!("✓ {}/{}個の画像を正常に処理しました", succeeded, total)
        }
        Failed { path, error } => format!("✗ 失敗: {} - {}", path.display(), error),
        WouldResize { input, output, width, height } => format!(
            "リサイズ予定: {} → {} ({}x{})",
            input.display(), output.display(), width, height
        ),
        Resized { input, output, width, height } => format!(
            "✓ リサイズ完了: {} → {} ({}x{})",
            input.display(), output.display(), width, height
        ),
        DimensionRequired => "幅または高さのいずれかを指定する必要があります".to_string(),
        WouldConvert { input, output, format, quality } => format!(
            "変換予定: {} → {} ({}{})",
            input.display(), output.display(), format, quality_suffix(quality)
        ),
        Converted { input, output, format } => format!(
            "✓ 変換完了: {} → {} ({})",
            input.display(), output.display(), format.label()
        ),
        QualityRange => "品質は1から100の間で指定してください".to_string(),
        ExifDataFor { path } => format!("EXIFデータ: {}", path.display()),
        NoExif => "この画像にはEXIFデータが見つかりませんでした。".to_string(),
        WouldStrip { input, output } => format!(
            "メタデータ削除予定: {} → {}",
            input.display(), output.display()
        ),
        Stripped { output } => format!("✓ メタデータ削除完了: {}", output.display()),
    }
}
