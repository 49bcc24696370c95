use crate::cli::CmdHashArgs;
use crate::passwd;
use crate::prelude::*;

pub fn hash_password(cli_args: CmdHashArgs) -> Result<()> {
    let password = match cli_args.password {
        Some(x) => x,
        None => {
            // read a single line from stdin so the password stays out of argv
            let mut line = String::new();
            std::io::stdin()
                .read_line(&mut line)
                .context("Could not read password from stdin")?;

            line.trim_end_matches(['\r', '\n']).to_string()
        }
    };

    if password.is_empty() {
        return Err(anyhow!("Refusing to hash an empty password"));
    }

    let salt = match cli_args.salt {
        Some(x) => x,
        None => passwd::generate_salt(16),
    };

    println!("{}", passwd::sha512_crypt(&password, &salt));

    Ok(())
}
