//! Defaults installed the first time the store file is created.

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use super::StoreData;
use crate::models::content::FieldNote;
use crate::models::drop::DropWindow;

pub(super) fn default_data(now: DateTime<Utc>) -> StoreData {
    let start = now + Duration::days(7);
    StoreData {
        signups: Vec::new(),
        field_notes: seed_field_notes(now),
        testimonials: Vec::new(),
        drop_windows: vec![DropWindow {
            id: Uuid::new_v4(),
            name: "Drop 01".to_string(),
            start_at: start,
            end_at: start + Duration::days(1),
            waitlist_copy: "Waitlist only. Confirm your spot to get first access.".to_string(),
            live_copy: "Drop window is live — secure your SNOOOM Hoodie now.".to_string(),
            post_copy: "This drop is closed. Join the list for the next run.".to_string(),
        }],
        events: Vec::new(),
    }
}

fn seed_field_notes(now: DateTime<Utc>) -> Vec<FieldNote> {
    SEED_NOTES
        .iter()
        .enumerate()
        .map(|(idx, (quote, author))| FieldNote {
            id: Uuid::new_v4(),
            quote: (*quote).to_string(),
            author: (*author).to_string(),
            active: true,
            created_at: now,
            updated_at: None,
            order: idx as u32,
        })
        .collect()
}

const SEED_NOTES: [(&str, &str); 20] = [
    (
        "Feels like something you’d thrift once and never find again. The weight, the drape—everything just clicks.",
        "Nate · Visual Designer",
    ),
    (
        "Has that old athletic department energy, but cleaned up. Like a hoodie they would’ve kept locked in the archives.",
        "Lex · Creative Runner",
    ),
    (
        "Wore it from a coffee run to a night session in the studio. Never stretched out, never lost shape.",
        "Mila · Photographer",
    ),
    (
        "The embroidery hits in person. People keep asking where it’s from every time I wear it.",
        "Dre · DJ & Curator",
    ),
    (
        "This is the hoodie I grab when I don’t want to overthink the outfit but still want it to feel intentional.",
        "Talia · Art Director",
    ),
    (
        "It has that vintage varsity DNA, but the fit is modern and clean. Not loud, just confident.",
        "Sage · Creative Consultant",
    ),
    (
        "Put it on for a flight and kept it on all weekend. Warm, heavy, and weirdly reassuring.",
        "Emi · DJ & Stylist",
    ),
    (
        "The hood actually holds its shape. No floppy sides, no weird collapse. It frames your face properly.",
        "Jordan · Creative Director",
    ),
    (
        "The inside feels like brushed fleece, the outside looks structured and sharp. It photographs insanely well.",
        "Kei · Filmmaker",
    ),
    (
        "Finally a hoodie that works for meetings, late-night drives, and early shoots without feeling try-hard.",
        "Lina · Founder",
    ),
    (
        "It hangs off the shoulders perfectly. Relaxed, but not sloppy. You can tell someone obsessed over the fit.",
        "Max · Stylist",
    ),
    (
        "The kind of hoodie that makes jeans, cargos, or sweats all feel like a full fit.",
        "Ro · Brand Strategist",
    ),
    (
        "Even after a few washes, the embroidery still looks crisp and raised. No sagging, no fuzz.",
        "Cam · Textile Designer",
    ),
    (
        "You put it on and instantly get that “archive piece” feeling, like it already has a story.",
        "Imani · Writer",
    ),
    (
        "Heavy enough for late-night walks, soft enough to crash on the sofa in. Basically lives on my chair now.",
        "Eli · Producer",
    ),
    (
        "The navy, cream and red combo just feels right. Classic but still different from what everyone else is wearing.",
        "Noor · Creative Assistant",
    ),
    (
        "It layers over tees and under coats without bunching. Whoever designed the pattern knew what they were doing.",
        "Jay · Art Student",
    ),
    (
        "Every time I go to hang it back up, I end up putting it back on. That’s the kind of piece this is.",
        "Hana · Curator",
    ),
    (
        "The ribbing at the cuffs and hem actually does its job. The silhouette stays clean all day.",
        "Luca · Motion Designer",
    ),
    (
        "It feels built for late nights, early mornings, and everything in between. Quiet, solid, reliable.",
        "Kai · Creative Producer",
    ),
];
