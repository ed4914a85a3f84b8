use arena::log;

/// In-process stand-in for the account service: the host debits the stake
/// when joining a table and credits the payout after a won match.
pub struct Wallet {
    balance: f64,
}

impl Wallet {
    pub fn new(starting_balance: f64) -> Self {
        Self {
            balance: starting_balance,
        }
    }

    pub fn balance(&self) -> f64 {
        self.balance
    }

    pub fn debit(&mut self, amount: f64) -> Result<(), String> {
        if amount > self.balance {
            return Err(format!(
                "Insufficient balance: {:.2} available, {:.2} required",
                self.balance, amount
            ));
        }
        self.balance -= amount;
        log!("Debited {:.2}, balance is now {:.2}", amount, self.balance);
        Ok(())
    }

    pub fn credit(&mut self, amount: f64) {
        self.balance += amount;
        log!("Credited {:.2}, balance is now {:.2}", amount, self.balance);
    }
}
