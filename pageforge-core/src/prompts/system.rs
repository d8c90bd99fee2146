//! Fixed system instruction for the page optimizer

const SYSTEM_INSTRUCTION_TEMPLATE: &str = include_str!("system.md");

/// Marker in the instruction template replaced by the lead-capture guide URL.
pub const GUIDE_LINK_PLACEHOLDER: &str = "{guide_link}";

/// The bundled instruction with `guide_link` filled in.
pub fn system_instruction(guide_link: &str) -> String {
    fill_template(SYSTEM_INSTRUCTION_TEMPLATE, guide_link)
}

pub(crate) fn fill_template(template: &str, guide_link: &str) -> String {
    template.trim_end().replace(GUIDE_LINK_PLACEHOLDER, guide_link)
}
