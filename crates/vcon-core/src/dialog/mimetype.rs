//! Mimetypes accepted for dialog content.

pub const TEXT_PLAIN: &str = "text/plain";
pub const MESSAGE_RFC822: &str = "message/rfc822";
pub const MULTIPART_MIXED: &str = "multipart/mixed";

pub const AUDIO_MIME_TYPES: [&str; 9] = [
    "audio/x-wav",
    "audio/wav",
    "audio/wave",
    "audio/mpeg",
    "audio/mp3",
    "audio/ogg",
    "audio/webm",
    "audio/x-m4a",
    "audio/aac",
];

pub const VIDEO_MIME_TYPES: [&str; 3] = ["video/mp4", "video/x-mp4", "video/ogg"];

/// Every mimetype a dialog may carry.
pub const MIME_TYPES: [&str; 15] = [
    TEXT_PLAIN,
    "audio/x-wav",
    "audio/wav",
    "audio/wave",
    "audio/mpeg",
    "audio/mp3",
    "audio/ogg",
    "audio/webm",
    "audio/x-m4a",
    "audio/aac",
    "video/mp4",
    "video/x-mp4",
    "video/ogg",
    MULTIPART_MIXED,
    MESSAGE_RFC822,
];

/// Exact, case-sensitive membership in [`MIME_TYPES`].
pub fn is_supported(mimetype: &str) -> bool {
    MIME_TYPES.contains(&mimetype)
}

pub fn is_text(mimetype: &str) -> bool {
    mimetype == TEXT_PLAIN
}

pub fn is_audio(mimetype: &str) -> bool {
    AUDIO_MIME_TYPES.contains(&mimetype)
}

pub fn is_video(mimetype: &str) -> bool {
    VIDEO_MIME_TYPES.contains(&mimetype)
}

pub fn is_email(mimetype: &str) -> bool {
    mimetype == MESSAGE_RFC822
}
