pub(crate) mod checklist;
pub(crate) mod hints;

pub(crate) use checklist::ChecklistRepository;
pub(crate) use hints::HintsRepository;
