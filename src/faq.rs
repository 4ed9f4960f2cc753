pub struct FaqEntry {
    pub question: &'static str,
    pub answer: &'static str,
}

pub const FAQ_ENTRIES: &[FaqEntry] = &[
    FaqEntry {
        question: "What is IdeaSpark?",
        answer: "IdeaSpark helps you capture, organize, and evaluate your ideas. Add descriptions, file ideas under categories, and label them 'best' or 'worst' to track which ones are worth pursuing.",
    },
    FaqEntry {
        question: "How do I add a new idea?",
        answer: "Open the Ideas page (press 2) and press 'a'. Fill in the title, an optional category and a description, then press Ctrl+S to save or Esc to cancel.",
    },
    FaqEntry {
        question: "Can I edit my ideas after adding them?",
        answer: "Yes. Select an idea on the Ideas page and press 'e'. The editor opens with the current title, category and description.",
    },
    FaqEntry {
        question: "What does the 'best' and 'worst' labeling system do?",
        answer: "Press 'b' to mark the selected idea as best or 'w' to mark it as worst. Pressing the same key again removes the label. Use Left/Right to switch between the All, Best, Worst, Shared and Unlabeled tabs.",
    },
    FaqEntry {
        question: "Where is my data stored?",
        answer: "Everything is saved as JSON files in your data directory (~/.local/share/ideaspark on Linux, or IDEASPARK_DATA_DIR if set). Nothing is sent anywhere. Deleting that directory removes your ideas.",
    },
    FaqEntry {
        question: "Can I export my ideas?",
        answer: "Yes. On the Ideas page press 'x' for a CSV file or 't' for a readable text report. Files are written to your Downloads folder (or IDEASPARK_EXPORT_DIR) as ideas_export_<date>. Press 'o' afterwards to open the file.",
    },
    FaqEntry {
        question: "How do I delete an idea?",
        answer: "Select it on the Ideas page and press 'd'. This cannot be undone.",
    },
    FaqEntry {
        question: "Why can't I delete a category?",
        answer: "A category can only be deleted once no idea uses it. Re-file or delete those ideas first, or rename the category with 'r' instead.",
    },
    FaqEntry {
        question: "How do I filter or search for specific ideas?",
        answer: "On the Ideas page press '/' and type to search titles and descriptions. Press 'f' to cycle through category filters and 'r' to reset all filters.",
    },
    FaqEntry {
        question: "Does sharing send anything to my collaborators?",
        answer: "No. Sharing records the collaborator's email on the idea and marks it as shared; there is no network transport.",
    },
];
