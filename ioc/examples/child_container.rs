use mini_container::Container;

struct Settings {
  environment: &'static str,
}

struct RequestContext {
  user: String,
}

// Each request gets a child container: shared services come from the root,
// request-scoped ones live only in the child.
fn handle_request(root: &Container, user: &str) -> mini_container::Result<String> {
  let scope = root.create_child_container();
  scope.add_instance(RequestContext {
    user: user.to_string(),
  })?;

  let settings = scope.get::<Settings>()?;
  let context = scope.get::<RequestContext>()?;
  Ok(format!("{} served in {}", context.user, settings.environment))
}

fn main() -> mini_container::Result<()> {
  let root = Container::new();
  root.add_instance(Settings {
    environment: "production",
  })?;

  println!("{}", handle_request(&root, "alice")?);
  println!("{}", handle_request(&root, "bob")?);

  assert!(
    root.get::<RequestContext>().is_err(),
    "Request scoped services should not leak into the root container!"
  );
  println!("Verified that request scopes are isolated from the root.");
  Ok(())
}
