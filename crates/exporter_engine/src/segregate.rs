use crate::types::Message;

/// Ordered content fragments of a single speaker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleGroup {
    pub speaker: String,
    pub fragments: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Segregated {
    /// One group per distinct speaker, in first-occurrence order.
    pub groups: Vec<RoleGroup>,
    /// Every message in its original order.
    pub full: Vec<Message>,
}

impl Segregated {
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn speakers(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|group| group.speaker.as_str())
    }
}

/// Group messages by exact speaker name in a single pass.
pub fn segregate_by_role(messages: Vec<Message>) -> Segregated {
    let mut segregated = Segregated::default();
    for message in messages {
        match segregated
            .groups
            .iter_mut()
            .find(|group| group.speaker == message.speaker)
        {
            Some(group) => group.fragments.push(message.content.clone()),
            None => segregated.groups.push(RoleGroup {
                speaker: message.speaker.clone(),
                fragments: vec![message.content.clone()],
            }),
        }
        segregated.full.push(message);
    }
    segregated
}
