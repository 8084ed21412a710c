use wikilink_md_config::Language;

/// Fixed table of user-facing strings for one UI language.
pub struct LocaleStrings {
    pub convert_button_text: &'static str,
    pub open_file_notice: &'static str,
    pub confirm_conversion_title: &'static str,
    pub confirm_conversion_message: &'static str,
    pub confirm_button: &'static str,
    pub cancel_button: &'static str,
    pub conversion_complete_notice: &'static str,
    pub confirm_change_title: &'static str,
    pub confirm_change_message: &'static str,
}

static EN_STRINGS: LocaleStrings = LocaleStrings {
    convert_button_text: "Convert WikiLinks to Markdown",
    open_file_notice: "Please open a file to convert",
    confirm_conversion_title: "Confirm Conversion",
    confirm_conversion_message:
        "Do you want to convert WikiLinks to Markdown format in the current document?",
    confirm_button: "Confirm",
    cancel_button: "Cancel",
    conversion_complete_notice: "Conversion complete",
    confirm_change_title: "Confirm Changes",
    confirm_change_message: "Conversion complete. Do you want to confirm the changes?",
};

static ZH_STRINGS: LocaleStrings = LocaleStrings {
    convert_button_text: "转换WikiLink为Markdown",
    open_file_notice: "请打开一篇文章以进行转换",
    confirm_conversion_title: "确认转换",
    confirm_conversion_message: "是否要转换当前文档中的WikiLinks为Markdown格式？",
    confirm_button: "确认",
    cancel_button: "取消",
    conversion_complete_notice: "转换完成",
    confirm_change_title: "确认更改",
    confirm_change_message: "转换完成,是否确认更改？",
};

/// Look up the string table for a language at read time.
pub fn strings(language: Language) -> &'static LocaleStrings {
    match language {
        Language::En => &EN_STRINGS,
        Language::Zh => &ZH_STRINGS,
    }
}
