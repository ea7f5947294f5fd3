//! Curated template phrase dictionaries, keyed by rhetorical category.

use oe_core::types::TemplateCategory;

/// Fixed similarity reported for every template hit.
pub const TEMPLATE_SIMILARITY: f64 = 0.5;

const INTRO: &[&str] = &[
    "大家好，欢迎来到",
    "欢迎收看",
    "今天我们来聊聊",
    "今天给大家介绍",
    "哈喽各位",
];

const TRANSITION: &[&str] = &[
    "接下来",
    "话不多说",
    "言归正传",
    "说到这里",
    "下面我们来看",
];

const CONCLUSION: &[&str] = &[
    "总而言之",
    "总的来说",
    "以上就是",
    "感谢观看",
    "我们下期再见",
    "记得点赞关注",
];

const EMPHASIS: &[&str] = &[
    "非常重要",
    "值得注意的是",
    "划重点",
    "一定要记住",
];

const SUBJECTIVE: &[&str] = &[
    "我觉得",
    "个人认为",
    "在我看来",
    "说实话",
];

/// Phrases registered for `category`.
pub fn phrases(category: TemplateCategory) -> &'static [&'static str] {
    match category {
        TemplateCategory::Intro => INTRO,
        TemplateCategory::Transition => TRANSITION,
        TemplateCategory::Conclusion => CONCLUSION,
        TemplateCategory::Emphasis => EMPHASIS,
        TemplateCategory::Subjective => SUBJECTIVE,
    }
}

/// Advice attached to a template hit.
pub fn suggestion(category: TemplateCategory) -> &'static str {
    match category {
        TemplateCategory::Intro => "replace the stock opening with a concrete hook",
        TemplateCategory::Transition => "use a content-specific transition",
        TemplateCategory::Conclusion => "close with a takeaway instead of a stock sign-off",
        TemplateCategory::Emphasis => "show why it matters instead of saying it",
        TemplateCategory::Subjective => "back the opinion with a specific reason",
    }
}

/// One phrase occurrence inside a text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateHit {
    pub category: TemplateCategory,
    pub phrase: &'static str,
    /// Char offset of the occurrence.
    pub offset: usize,
}

/// Every occurrence of every dictionary phrase in `text`, in category order.
pub fn find_templates(text: &str) -> Vec<TemplateHit> {
    let mut hits = Vec::new();
    for category in TemplateCategory::ALL {
        for &phrase in phrases(category) {
            for (byte_idx, _) in text.match_indices(phrase) {
                hits.push(TemplateHit {
                    category,
                    phrase,
                    offset: text[..byte_idx].chars().count(),
                });
            }
        }
    }
    hits
}
