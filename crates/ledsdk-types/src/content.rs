//! Program content tree shown on the display.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashSet;
use uuid::Uuid;

use crate::border::Border;
use crate::clock::ClockParam;
use crate::error::{SdkError, SdkResult};
use crate::file::FileInfo;
use crate::payload::Payload;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Program,
    Area,
    Text,
    Image,
    Video,
    Clock,
}

/// A node of a program tree: programs hold areas, areas hold media.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentNode {
    #[serde(rename = "type")]
    pub node_type: ContentType,
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub properties: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border: Option<Border>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clock: Option<ClockParam>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<FileInfo>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ContentNode>,
}

impl ContentNode {
    pub fn new(node_type: ContentType, name: impl Into<String>) -> Self {
        Self {
            node_type,
            id: Uuid::new_v4().simple().to_string(),
            name: name.into(),
            properties: Map::new(),
            border: None,
            clock: None,
            file: None,
            children: Vec::new(),
        }
    }

    pub fn program(name: impl Into<String>) -> Self {
        Self::new(ContentType::Program, name)
    }

    pub fn area(name: impl Into<String>) -> Self {
        Self::new(ContentType::Area, name)
    }

    pub fn text(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(ContentType::Text, name).with_property("text", text.into())
    }

    pub fn image(file: FileInfo) -> Self {
        let name = file.name.clone();
        Self::new(ContentType::Image, name).with_file(file)
    }

    pub fn video(file: FileInfo) -> Self {
        let name = file.name.clone();
        Self::new(ContentType::Video, name).with_file(file)
    }

    pub fn clock(name: impl Into<String>, param: ClockParam) -> Self {
        let mut node = Self::new(ContentType::Clock, name);
        node.clock = Some(param);
        node
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    pub fn with_border(mut self, border: Border) -> Self {
        self.border = Some(border);
        self
    }

    pub fn with_file(mut self, file: FileInfo) -> Self {
        self.file = Some(file);
        self
    }

    pub fn with_child(mut self, child: ContentNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn add_child(&mut self, child: ContentNode) -> &mut Self {
        self.children.push(child);
        self
    }

    pub fn property(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }

    pub fn set_property(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.properties.insert(key.into(), value.into());
    }

    /// All nodes of the tree in pre-order, starting with `self`.
    pub fn walk(&self) -> Vec<&ContentNode> {
        let mut nodes = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            nodes.push(node);
            stack.extend(node.children.iter().rev());
        }
        nodes
    }

    pub fn find(&self, id: &str) -> Option<&ContentNode> {
        self.walk().into_iter().find(|node| node.id == id)
    }

    /// Distinct files referenced anywhere in the tree, in pre-order.
    pub fn files(&self) -> Vec<&FileInfo> {
        let mut seen = HashSet::new();
        self.walk()
            .into_iter()
            .filter_map(|node| node.file.as_ref())
            .filter(|file| seen.insert(*file))
            .collect()
    }

    /// Mutable access to every file in the tree, used to record upload URLs.
    pub fn files_mut(&mut self) -> Vec<&mut FileInfo> {
        let mut files = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            if let Some(file) = node.file.as_mut() {
                files.push(file);
            }
            stack.extend(node.children.iter_mut().rev());
        }
        files
    }

    /// Check every node of the tree. Clock nodes must carry a valid clock
    /// and image/video nodes must reference a file.
    pub fn validate(&self) -> SdkResult<()> {
        for node in self.walk() {
            match node.node_type {
                ContentType::Clock => match &node.clock {
                    Some(clock) => clock.validate()?,
                    None => {
                        return Err(SdkError::validation(format!(
                            "Clock node '{}' has no clock parameters",
                            node.id
                        )))
                    }
                },
                ContentType::Image | ContentType::Video if node.file.is_none() => {
                    return Err(SdkError::validation(format!(
                        "Media node '{}' has no file",
                        node.id
                    )));
                }
                _ => {}
            }
        }
        Ok(())
    }
}

impl Payload for ContentNode {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::border::BorderEffect;
    use serde_json::json;

    fn sample_tree() -> ContentNode {
        let logo = FileInfo::new("/media/logo.png");
        ContentNode::program("Morning")
            .with_id("p1")
            .with_child(
                ContentNode::area("Top")
                    .with_id("a1")
                    .with_border(Border::new(2).with_effect(BorderEffect::Static))
                    .with_child(ContentNode::text("Greeting", "Hello").with_id("t1"))
                    .with_child(ContentNode::image(logo.clone()).with_id("i1")),
            )
            .with_child(
                ContentNode::area("Bottom")
                    .with_id("a2")
                    .with_child(ContentNode::image(logo).with_id("i2"))
                    .with_child(ContentNode::video(FileInfo::new("/media/ad.mp4")).with_id("v1")),
            )
    }

    #[test]
    fn test_walk_is_pre_order() {
        let tree = sample_tree();
        let ids: Vec<&str> = tree.walk().into_iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["p1", "a1", "t1", "i1", "a2", "i2", "v1"]);
    }

    #[test]
    fn test_files_are_deduplicated_by_path() {
        let tree = sample_tree();
        let names: Vec<&str> = tree.files().into_iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["logo.png", "ad.mp4"]);
    }

    #[test]
    fn test_files_mut_reaches_every_reference() {
        let mut tree = sample_tree();
        for file in tree.files_mut() {
            let url = format!("http://device/{}", file.name);
            file.set_url(url);
        }
        assert!(tree.walk().iter().filter_map(|n| n.file.as_ref()).all(|f| f.is_uploaded()));
        assert_eq!(
            tree.find("i2").unwrap().file.as_ref().unwrap().url.as_deref(),
            Some("http://device/logo.png")
        );
    }

    #[test]
    fn test_text_node_dict() {
        let dict = ContentNode::text("Title", "Welcome")
            .with_id("t9")
            .to_dict()
            .unwrap();
        assert_eq!(
            dict,
            json!({"type": "text", "id": "t9", "name": "Title", "properties": {"text": "Welcome"}})
        );
    }

    #[test]
    fn test_tree_round_trip() {
        let tree = sample_tree();
        let restored = ContentNode::from_dict(tree.to_dict().unwrap()).unwrap();
        assert_eq!(restored, tree);
        assert_eq!(restored.find("a1").unwrap().border.as_ref().unwrap().border_type, 2);
    }

    #[test]
    fn test_generated_ids_are_unique() {
        let a = ContentNode::area("x");
        let b = ContentNode::area("x");
        assert_ne!(a.id, b.id);
        assert_eq!(a.id.len(), 32);
    }

    #[test]
    fn test_properties_accessors() {
        let mut node = ContentNode::text("t", "one");
        node.set_property("fontSize", 24);
        assert_eq!(node.property("text"), Some(&json!("one")));
        assert_eq!(node.property("fontSize"), Some(&json!(24)));
        assert!(node.property("missing").is_none());
    }

    #[test]
    fn test_validate_checks_nested_clocks() {
        let mut tree = sample_tree();
        assert!(tree.validate().is_ok());

        tree.children[0].add_child(
            ContentNode::clock("Shanghai", ClockParam::default().with_timezone("+8"))
                .with_id("c1"),
        );
        let err = tree.validate().unwrap_err();
        assert!(err.to_string().contains("+8"));

        let mut bare_clock = ContentNode::new(ContentType::Clock, "bare");
        assert!(bare_clock.validate().is_err());
        bare_clock.clock = Some(ClockParam::default());
        assert!(bare_clock.validate().is_ok());

        assert!(ContentNode::new(ContentType::Video, "no file").validate().is_err());
    }
}
