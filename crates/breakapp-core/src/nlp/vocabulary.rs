//! Fixed phrase tables for keyword classification and entity extraction.

use super::intent::Intent;
use crate::language::Language;

/// Trigger phrases for one intent.
pub(crate) struct IntentTriggers {
    pub intent: Intent,
    pub phrases: &'static [&'static str],
}

/// Declaration order is match priority.
static ENGLISH_TRIGGERS: &[IntentTriggers] = &[
    IntentTriggers {
        intent: Intent::OrderUsual,
        phrases: &["usual order", "my usual", "same as always", "regular order", "the usual"],
    },
    IntentTriggers {
        intent: Intent::OrderItem,
        phrases: &["i want", "i'd like", "i would like", "get me", "order me", "can i have"],
    },
    IntentTriggers {
        intent: Intent::SearchMenu,
        phrases: &[
            "options",
            "show menu",
            "show me the menu",
            "what's available",
            "menu items",
            "find",
            "search",
            "nearby",
        ],
    },
    IntentTriggers {
        intent: Intent::CancelOrder,
        phrases: &["cancel", "stop", "never mind", "forget it"],
    },
    IntentTriggers {
        intent: Intent::AddToOrder,
        phrases: &["add", "also", "plus", "as well"],
    },
    IntentTriggers {
        intent: Intent::GetRecommendations,
        phrases: &["recommend", "suggest", "healthy", "light"],
    },
];

static ARABIC_TRIGGERS: &[IntentTriggers] = &[
    IntentTriggers {
        intent: Intent::OrderUsual,
        phrases: &["الطلب المعتاد", "طلبي المعتاد", "نفس الطلب", "الطلب العادي"],
    },
    IntentTriggers {
        intent: Intent::OrderItem,
        phrases: &["أريد", "اطلب", "أطلب", "بدي"],
    },
    IntentTriggers {
        intent: Intent::SearchMenu,
        phrases: &["ما هي الخيارات", "ما المتاح", "اعرض القائمة", "ما في القائمة", "ابحث", "قريب"],
    },
    IntentTriggers {
        intent: Intent::CancelOrder,
        phrases: &["ألغي", "إلغاء", "لا أريد", "توقف"],
    },
    IntentTriggers {
        intent: Intent::AddToOrder,
        phrases: &["أضف", "زيد", "أريد أيضاً", "وأيضاً"],
    },
    IntentTriggers {
        intent: Intent::GetRecommendations,
        phrases: &["اقترح", "أنصحني", "ما تنصح", "شيء صحي", "شيء خفيف"],
    },
];

pub(crate) fn intent_triggers(language: Language) -> &'static [IntentTriggers] {
    match language {
        Language::English => ENGLISH_TRIGGERS,
        Language::Arabic => ARABIC_TRIGGERS,
    }
}

pub(crate) fn food_vocabulary(language: Language) -> &'static [&'static str] {
    match language {
        Language::English => &[
            "burger", "pizza", "salad", "shawarma", "falafel", "mandi", "kabsa", "grilled",
            "coffee", "juice",
        ],
        Language::Arabic => &[
            "برجر", "بيتزا", "سلطة", "شاورما", "فلافل", "مندي", "كبسة", "مشاوي", "قهوة", "عصير",
        ],
    }
}

/// Example phrases offered when nothing was understood.
pub(crate) fn example_phrases(language: Language) -> &'static [&'static str] {
    match language {
        Language::English => &["Order my usual", "I want a burger", "What are the available options"],
        Language::Arabic => &["اطلب لي الطلب المعتاد", "أريد برجر", "ما هي الخيارات المتاحة"],
    }
}

/// Spelled-out quantities recognised by the extractor.
pub(crate) fn number_word_value(word: &str) -> Option<u32> {
    match word {
        "one" | "واحد" => Some(1),
        "two" | "اثنين" | "اثنان" => Some(2),
        "three" | "ثلاثة" => Some(3),
        "four" | "أربعة" => Some(4),
        "five" | "خمسة" => Some(5),
        _ => None,
    }
}
