//! Reading `account` declarations.

use crate::LoadError;
use rbooks_core::AccountName;
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

const ACCOUNT_KEYWORD: &str = "account";
const COMMENT: char = ';';

/// Read the declarations file and return the declared account names.
///
/// # Errors
///
/// Returns [`LoadError::Io`] if the file cannot be read.
pub fn extract_defined_accounts(path: &Path) -> Result<BTreeSet<AccountName>, LoadError> {
    let content = fs::read_to_string(path).map_err(|e| LoadError::io(path, e))?;
    let accounts = parse_declarations(&content);
    tracing::debug!(path = %path.display(), count = accounts.len(), "read account declarations");
    Ok(accounts)
}

/// Collect the account names declared in `content`.
///
/// A declaration is a line that, once trimmed, reads `account <name>`,
/// optionally followed by a `; comment`. Everything else is ignored.
///
/// ```
/// use rbooks_loader::parse_declarations;
///
/// let accounts = parse_declarations("account Assets:Cash ; petty cash\n; account Fake\n");
/// assert_eq!(accounts.len(), 1);
/// assert!(accounts.contains("Assets:Cash"));
/// ```
pub fn parse_declarations(content: &str) -> BTreeSet<AccountName> {
    content.lines().filter_map(declared_account).collect()
}

fn declared_account(line: &str) -> Option<AccountName> {
    let trimmed = line.trim();
    if trimmed.starts_with(COMMENT) {
        return None;
    }
    let rest = trimmed.strip_prefix(ACCOUNT_KEYWORD)?;
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    let name = rest.split(COMMENT).next().unwrap_or_default().trim();
    (!name.is_empty()).then(|| AccountName::new(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_declarations() {
        let content = "account Assets\naccount Assets:Bank\n; account Fake\n  account Income:Sales ; client revenue\n";
        let accounts: Vec<String> = parse_declarations(content)
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(accounts, ["Assets", "Assets:Bank", "Income:Sales"]);
    }

    #[test]
    fn test_ignores_other_directives() {
        let content = "\
; Chart of accounts
commodity JPY
accounts Assets:Typo
account
account\tExpenses:Rent
account Expenses:Rent
alias A=Assets
";
        let accounts = parse_declarations(content);
        assert_eq!(accounts.len(), 1);
        assert!(accounts.contains("Expenses:Rent"));
    }

    #[test]
    fn test_child_without_parent_is_kept() {
        let accounts = parse_declarations("account Liabilities:CreditCard\n");
        assert!(accounts.contains("Liabilities:CreditCard"));
        assert!(!accounts.contains("Liabilities"));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = extract_defined_accounts(Path::new("/nonexistent/accounts.ledger")).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }
}
