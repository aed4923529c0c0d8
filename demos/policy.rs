use jtree_core::policy::Policy;
use miette::Report;

fn main() {
    let Some(path) = std::env::args().nth(1) else {
        eprintln!("usage: policy <policy.json>");
        std::process::exit(2);
    };

    match jtree_core::decode_file::<Policy>(&path) {
        Ok(policy) => {
            println!("Version: {}", policy.version);
            println!("Id: {}", policy.id);
            for statement in &policy.statement {
                println!("{}", statement.sid);
                println!("{}", statement.effect);
                for referer in &statement.conditions.allow.referer {
                    println!("  allow referer {referer}");
                }
                for referer in &statement.conditions.deny.referer {
                    println!("  deny referer {referer}");
                }
            }
        }
        Err(e) => {
            eprintln!("{:?}", Report::new(e));
            std::process::exit(1);
        }
    }
}
