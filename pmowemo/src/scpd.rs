//! Service description (SCPD) parsing
//!
//! A service description lists the actions a device accepts and the named
//! arguments of each. Only names are consumed here: argument direction and
//! state-variable bindings are not needed for invocation.

use std::io::BufRead;

use quick_xml::{Error as XmlError, Reader, events::Event};

use crate::error::Result;

/// One action as described by the service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionDescriptor {
    /// Action name (ex: "SetBinaryState")
    pub name: String,

    /// Argument names in document order
    pub arguments: Vec<String>,
}

/// Parse the `<actionList>` of a service description document.
///
/// Actions are returned in document order. A well-formed document without
/// an `<actionList>` yields an empty list.
pub fn parse_scpd<R: BufRead>(reader: R) -> Result<Vec<ActionDescriptor>> {
    let mut reader = Reader::from_reader(reader);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut actions = Vec::new();

    let mut in_action_list = false;
    let mut in_action = false;
    let mut in_argument = false;
    let mut current_tag: Option<String> = None;
    let mut current_name: Option<String> = None;
    let mut current_arguments: Vec<String> = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                match name.as_str() {
                    "actionList" => {
                        in_action_list = true;
                    }
                    "action" if in_action_list => {
                        in_action = true;
                        current_name = None;
                        current_arguments = Vec::new();
                    }
                    "argument" if in_action => {
                        in_argument = true;
                    }
                    _ => {
                        if in_action {
                            current_tag = Some(name);
                        }
                    }
                }
            }
            Event::End(e) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                match name.as_str() {
                    "actionList" => {
                        in_action_list = false;
                    }
                    "action" if in_action => {
                        // An <action> without a <name> is unusable, skip it
                        if let Some(name) = current_name.take() {
                            actions.push(ActionDescriptor {
                                name,
                                arguments: std::mem::take(&mut current_arguments),
                            });
                        }
                        in_action = false;
                    }
                    "argument" => {
                        in_argument = false;
                    }
                    _ => {}
                }
                current_tag = None;
            }
            Event::Text(e) => {
                if let Some(tag) = &current_tag {
                    if tag == "name" {
                        let text = e.decode().map_err(XmlError::Encoding)?.into_owned();
                        if in_argument {
                            current_arguments.push(text);
                        } else if current_name.is_none() {
                            current_name = Some(text);
                        }
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }

        buf.clear();
    }

    Ok(actions)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASICEVENT_SCPD: &str = r#"<?xml version="1.0"?>
<scpd xmlns="urn:Belkin:service-1-0">
  <specVersion>
    <major>1</major>
    <minor>0</minor>
  </specVersion>
  <actionList>
    <action>
      <name>SetBinaryState</name>
      <argumentList>
        <argument>
          <retval/>
          <name>BinaryState</name>
          <relatedStateVariable>BinaryState</relatedStateVariable>
          <direction>in</direction>
        </argument>
      </argumentList>
    </action>
    <action>
      <name>GetBinaryState</name>
      <argumentList>
        <argument>
          <retval/>
          <name>BinaryState</name>
          <relatedStateVariable>BinaryState</relatedStateVariable>
          <direction>out</direction>
        </argument>
      </argumentList>
    </action>
    <action>
      <name>GetFriendlyName</name>
      <argumentList>
        <argument>
          <name>FriendlyName</name>
          <relatedStateVariable>FriendlyName</relatedStateVariable>
          <direction>out</direction>
        </argument>
        <argument>
          <name>DeviceUDN</name>
          <relatedStateVariable>DeviceUDN</relatedStateVariable>
          <direction>out</direction>
        </argument>
      </argumentList>
    </action>
  </actionList>
  <serviceStateTable>
    <stateVariable sendEvents="yes">
      <name>BinaryState</name>
      <dataType>Boolean</dataType>
      <defaultValue>0</defaultValue>
    </stateVariable>
  </serviceStateTable>
</scpd>"#;

    #[test]
    fn test_parse_actions_in_document_order() {
        let actions = parse_scpd(BASICEVENT_SCPD.as_bytes()).unwrap();

        assert_eq!(actions.len(), 3);
        assert_eq!(actions[0].name, "SetBinaryState");
        assert_eq!(actions[1].name, "GetBinaryState");
        assert_eq!(actions[2].name, "GetFriendlyName");
    }

    #[test]
    fn test_argument_names_in_document_order() {
        let actions = parse_scpd(BASICEVENT_SCPD.as_bytes()).unwrap();

        assert_eq!(actions[0].arguments, vec!["BinaryState"]);
        assert_eq!(actions[2].arguments, vec!["FriendlyName", "DeviceUDN"]);
    }

    #[test]
    fn test_state_table_names_are_not_actions() {
        let actions = parse_scpd(BASICEVENT_SCPD.as_bytes()).unwrap();

        assert!(actions.iter().all(|a| a.name != "BinaryState"));
    }

    #[test]
    fn test_action_without_arguments() {
        let xml = r#"<?xml version="1.0"?>
<scpd xmlns="urn:Belkin:service-1-0">
  <actionList>
    <action>
      <name>ReSetup</name>
    </action>
  </actionList>
</scpd>"#;

        let actions = parse_scpd(xml.as_bytes()).unwrap();
        assert_eq!(actions.len(), 1);
        assert_eq!(actions[0].name, "ReSetup");
        assert!(actions[0].arguments.is_empty());
    }

    #[test]
    fn test_document_without_action_list() {
        let xml = r#"<?xml version="1.0"?>
<scpd xmlns="urn:Belkin:service-1-0">
  <serviceStateTable>
    <stateVariable sendEvents="yes">
      <name>BinaryState</name>
      <dataType>Boolean</dataType>
    </stateVariable>
  </serviceStateTable>
</scpd>"#;

        let actions = parse_scpd(xml.as_bytes()).unwrap();
        assert!(actions.is_empty());
    }

    #[test]
    fn test_truncated_document_is_an_error() {
        let xml = "<scpd><actionList><action><name";

        assert!(parse_scpd(xml.as_bytes()).is_err());
    }
}
