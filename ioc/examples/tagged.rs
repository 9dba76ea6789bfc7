use mini_container::{Container, Tag};
use std::fmt;
use std::sync::Arc;

trait MessageSender: Send + Sync {
  fn send(&self, to: &str, message: &str) -> String;
}

struct EmailSender;
impl MessageSender for EmailSender {
  fn send(&self, to: &str, message: &str) -> String {
    format!("Sending email to {}: '{}'", to, message)
  }
}

struct SmsSender;
impl MessageSender for SmsSender {
  fn send(&self, to: &str, message: &str) -> String {
    format!("Sending SMS to {}: '{}'", to, message)
  }
}

// Tags do not have to be strings.
#[derive(Debug, PartialEq, Eq, Hash)]
enum Channel {
  Email,
  Sms,
}

impl fmt::Display for Channel {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    fmt::Debug::fmt(self, f)
  }
}

type Sender = Arc<dyn MessageSender>;

fn main() -> mini_container::Result<()> {
  let container = Container::new();
  container.single_tagged(Tag::new(Channel::Email), |_, _| Ok(Arc::new(EmailSender) as Sender))?;
  container.single_tagged(Tag::new(Channel::Sms), |_, _| Ok(Arc::new(SmsSender) as Sender))?;

  let email = container.get_tagged::<Sender>(Tag::new(Channel::Email))?;
  let sms = container.get_tagged::<Sender>(Tag::new(Channel::Sms))?;

  let result1 = email.send("test@example.com", "Hello!");
  let result2 = sms.send("+123456789", "Hello!");
  println!("{}", result1);
  println!("{}", result2);
  assert!(result1.contains("email"));
  assert!(result2.contains("SMS"));

  // No untagged binding exists.
  match container.get::<Sender>() {
    Ok(_) => panic!("untagged sender should not resolve"),
    Err(error) => println!("{}", error),
  }
  Ok(())
}
